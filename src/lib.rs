// src/lib.rs
//! A Bayesian text classifier over user-defined pools.
//!
//! Each pool accumulates token counts from training text. A guess scores
//! every token of a message against every pool and combines those scores
//! into one probability per pool.
//!
//! ```
//! use bishop::Bayes;
//!
//! let mut bayes = Bayes::new();
//! bayes.train("spam", "cheap pills buy now").unwrap();
//! bayes.train("ham", "lunch meeting moved to noon").unwrap();
//!
//! let guess = bayes.guess("buy cheap pills");
//! assert!(guess["spam"] > 0.9);
//! assert!(!guess.contains_key("ham"));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod learning;
pub mod persistence;

pub use crate::config::{BayesConfig, ScoringConfig};
pub use crate::core::combiner::{Combiner, CombinerKind, Robinson, RobinsonFisher};
pub use crate::core::engine::Bayes;
pub use crate::core::pool::Pool;
pub use crate::core::tokenizer::{
    SimpleTokenizer, StemmingTokenizer, StopWords, Tokenizer, TokenizerKind,
};
pub use crate::core::types::{TextInput, Token};
pub use crate::error::{BayesError, Result};
pub use crate::persistence::{PoolSnapshot, Snapshot};
