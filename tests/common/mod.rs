//! Shared training texts for integration tests.
#![allow(dead_code)]

pub const LINCOLN1: &str = "Four score and seven years ago our fathers brought forth on this continent, \
    a new nation, conceived in Liberty, and dedicated to the proposition that all \
    men are created equal.";
pub const LINCOLN2: &str = "Now we are engaged in a great civil war, testing whether that nation, \
    or any nation so conceived and so dedicated, can long endure. We are met on \
    a great battle-field of that war. We have come to dedicate a portion of that \
    field, as a final resting place for those who here gave their lives that that \
    nation might live. It is altogether fitting and proper that we should do this.";
pub const LINCOLN3: &str = "But, in a larger sense, we can not dedicate -- we can not consecrate -- \
    we can not hallow -- this ground. ";
pub const LINCOLN4: &str = "The brave men, living and dead, who struggled here, have consecrated it, \
    far above our poor power to add or detract. ";

pub const JABBER1: &str = "Beware the Jabberwock, my son! The jaws that bite, the claws that catch! \
    Beware the Jubjub bird, and shun The frumious Bandersnatch!";
pub const JABBER2: &str = "He took his vorpal sword in hand: Long time the manxome foe he sought -- \
    So rested he by the Tumtum tree, And stood awhile in thought. ";
pub const JABBER3: &str = "And, as in uffish thought he stood, The Jabberwock, with eyes of flame, \
    Came whiffling through the tulgey wood, And burbled as it came!";
pub const JABBER4: &str = "One, two! One, two! And through and through The vorpal blade went snicker-snack! \
    He left it dead, and with its head He went galumphing back.";

pub const ROMEO: &str = "Two households, both alike in dignity, In fair Verona, where we lay our scene, \
    From ancient grudge break to new mutiny, ";

pub fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Lincoln and Jabberwocky pools, default stop words loaded.
pub fn trained_engine() -> bishop::Bayes {
    let mut b = bishop::Bayes::new();
    b.load_default_stop_words();
    for text in [LINCOLN1, LINCOLN2, LINCOLN3] {
        b.train("lincoln", text).unwrap();
    }
    for text in [JABBER1, JABBER2, JABBER3] {
        b.train("jabber", text).unwrap();
    }
    b
}
