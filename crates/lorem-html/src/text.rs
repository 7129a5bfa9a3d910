//! Random filler text.

use ecow::{eco_format, EcoString};

use crate::random::RandomSource;

/// A source of plausible filler text.
pub trait TextProvider {
    /// A single random word.
    fn word(&mut self) -> EcoString;

    /// A capitalized sentence ending with a period.
    ///
    /// With `variable` set, the word count is scaled to between 60% and 140%
    /// of `words`, plus one. Zero words yields an empty string.
    fn sentence(&mut self, words: u32, variable: bool) -> EcoString;

    /// A paragraph of sentences separated by spaces, with the same `variable`
    /// scaling as [`TextProvider::sentence`] applied to the sentence count.
    fn paragraph(&mut self, sentences: u32, variable: bool) -> EcoString;

    /// A domain that is safe to use in fake addresses, e.g. `example.org`.
    fn safe_email_domain(&mut self) -> EcoString;

    /// A random number with at most `digits` digits.
    fn random_number(&mut self, digits: u32) -> u64;

    /// `count` words.
    fn words(&mut self, count: u32) -> Vec<EcoString> {
        (0..count).map(|_| self.word()).collect()
    }

    /// `count` sentences of about six words each.
    fn sentences(&mut self, count: u32) -> Vec<EcoString> {
        (0..count).map(|_| self.sentence(6, true)).collect()
    }

    /// `count` paragraphs of about three sentences each.
    fn paragraphs(&mut self, count: u32) -> Vec<EcoString> {
        (0..count).map(|_| self.paragraph(3, true)).collect()
    }
}

const SAFE_TLDS: [&str; 3] = ["org", "com", "net"];

/// Latin filler vocabulary.
const WORDS: &[&str] = &[
    "alias", "consequatur", "aut", "perferendis", "sit", "voluptatem", "accusantium",
    "doloremque", "aperiam", "eaque", "ipsa", "quae", "ab", "illo", "inventore",
    "veritatis", "et", "quasi", "architecto", "beatae", "vitae", "dicta", "sunt", "explicabo",
    "aspernatur", "odit", "fugit", "sed", "quia", "consequuntur", "magni", "dolores", "eos",
    "qui", "ratione", "sequi", "nesciunt", "neque", "dolorem", "ipsum", "dolor", "amet",
    "consectetur", "adipisci", "velit", "non", "numquam", "eius", "modi", "tempora",
    "incidunt", "ut", "labore", "dolore", "magnam", "aliquam", "quaerat", "enim", "ad",
    "minima", "veniam", "quis", "nostrum", "exercitationem", "ullam", "corporis", "nemo",
    "ipsam", "voluptas", "suscipit", "laboriosam", "nisi", "aliquid", "ex", "ea", "commodi",
    "autem", "vel", "eum", "iure", "reprehenderit", "in", "voluptate", "esse", "quam",
    "nihil", "molestiae", "iusto", "odio", "dignissimos", "ducimus", "blanditiis",
    "praesentium", "laudantium", "totam", "rem", "voluptatum", "deleniti", "atque",
    "corrupti", "quos", "quas", "molestias", "excepturi", "sint", "occaecati", "cupiditate",
    "provident", "perspiciatis", "unde", "omnis", "iste", "natus", "error", "similique",
    "culpa", "officia", "deserunt", "mollitia", "animi", "id", "est", "laborum", "dolorum",
    "fuga", "harum", "quidem", "rerum", "facilis", "expedita", "distinctio", "nam", "libero",
    "tempore", "cum", "soluta", "nobis", "eligendi", "optio", "cumque", "impedit", "quo",
    "porro", "minus", "maxime", "placeat", "facere", "possimus", "assumenda", "repellendus",
    "temporibus", "quibusdam", "illum", "fugiat", "nulla", "pariatur", "at", "vero",
    "accusamus", "officiis", "debitis", "necessitatibus", "saepe", "eveniet", "ut", "et",
    "voluptates", "repudiandae", "recusandae", "itaque", "earum", "hic", "tenetur", "a",
    "sapiente", "delectus", "reiciendis", "voluptatibus", "maiores", "doloribus", "asperiores",
    "repellat",
];

/// Lorem-ipsum text drawn from a fixed Latin vocabulary.
#[derive(Debug, Clone)]
pub struct LoremText<R = fastrand::Rng> {
    rng: R,
}

impl Default for LoremText {
    fn default() -> Self {
        Self::new(fastrand::Rng::new())
    }
}

impl LoremText {
    /// Creates a provider whose output is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(fastrand::Rng::with_seed(seed))
    }
}

impl<R: RandomSource> LoremText<R> {
    /// Creates a provider drawing from the given random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Scales `count` to 60%..=140% of itself, plus one.
    fn randomize_count(&mut self, count: u32) -> u32 {
        let percent = u64::from(self.rng.int(60, 140));
        let scaled = u64::from(count) * percent / 100;
        u32::try_from(scaled).unwrap_or(u32::MAX).saturating_add(1)
    }
}

impl<R: RandomSource> TextProvider for LoremText<R> {
    fn word(&mut self) -> EcoString {
        WORDS[self.rng.index(WORDS.len())].into()
    }

    fn sentence(&mut self, words: u32, variable: bool) -> EcoString {
        if words == 0 {
            return EcoString::new();
        }
        let count = if variable {
            self.randomize_count(words)
        } else {
            words
        };

        let mut sentence = EcoString::new();
        for (i, word) in self.words(count).iter().enumerate() {
            if i == 0 {
                sentence.push_str(&ucfirst(word));
            } else {
                sentence.push(' ');
                sentence.push_str(word);
            }
        }
        sentence.push('.');
        sentence
    }

    fn paragraph(&mut self, sentences: u32, variable: bool) -> EcoString {
        if sentences == 0 {
            return EcoString::new();
        }
        let count = if variable {
            self.randomize_count(sentences)
        } else {
            sentences
        };
        self.sentences(count).join(" ").into()
    }

    fn safe_email_domain(&mut self) -> EcoString {
        let tld = SAFE_TLDS[self.rng.index(SAFE_TLDS.len())];
        eco_format!("example.{tld}")
    }

    fn random_number(&mut self, digits: u32) -> u64 {
        let max = 10u64.pow(digits.min(19)) - 1;
        // Two draws cover the full `u64` range of a `u32` source.
        let high = u64::from(self.rng.int(0, u32::MAX));
        let low = u64::from(self.rng.int(0, u32::MAX));
        ((high << 32) | low) % (max + 1)
    }
}

/// Upper-cases the first character.
pub fn ucfirst(text: &str) -> EcoString {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut out: EcoString = first.to_uppercase().collect::<String>().into();
            out.push_str(chars.as_str());
            out
        }
        None => EcoString::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_is_capitalized_and_terminated() {
        let mut text = LoremText::seeded(1);
        for words in 1..20 {
            let sentence = text.sentence(words, false);
            assert_eq!(sentence.split(' ').count(), words as usize);
            assert!(sentence.ends_with('.'));
            assert!(sentence.chars().next().is_some_and(char::is_uppercase));
        }
    }

    #[test]
    fn variable_sentence_scales_word_count() {
        let mut text = LoremText::seeded(2);
        for _ in 0..200 {
            let count = text.sentence(10, true).split(' ').count();
            assert!((7..=15).contains(&count), "{count} words");
        }
    }

    #[test]
    fn empty_requests_yield_empty_text() {
        let mut text = LoremText::seeded(3);
        assert_eq!(text.sentence(0, true), "");
        assert_eq!(text.paragraph(0, true), "");
    }

    #[test]
    fn random_number_respects_digits() {
        let mut text = LoremText::seeded(4);
        for _ in 0..1000 {
            assert!(text.random_number(5) <= 99_999);
        }
        assert_eq!(text.random_number(0), 0);
    }

    #[test]
    fn safe_domains_are_reserved() {
        let mut text = LoremText::seeded(5);
        for _ in 0..50 {
            let domain = text.safe_email_domain();
            assert!(["example.org", "example.com", "example.net"].contains(&domain.as_str()));
        }
    }

    #[test]
    fn same_seed_same_text() {
        let a = LoremText::seeded(9).paragraphs(3);
        let b = LoremText::seeded(9).paragraphs(3);
        assert_eq!(a, b);
    }

    #[test]
    fn ucfirst_handles_edges() {
        assert_eq!(ucfirst(""), "");
        assert_eq!(ucfirst("dolor"), "Dolor");
        assert_eq!(ucfirst("élan"), "Élan");
    }
}
