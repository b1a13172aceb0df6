/// English smoothing applied to finished captions.
///
/// Template fragments are written without knowing which expansion will
/// follow them, so a caption can come out as "a orange" or with doubled
/// spaces where an empty alternative landed. A [`Normalizer`] runs once
/// over the finished string to repair that. The engine only ever sees
/// the trait, so a caller with different rules (or none) can swap in
/// its own implementation.

/// Post-processing pass over a fully instantiated caption.
pub trait Normalizer: std::fmt::Debug + Send + Sync {
    fn normalize(&self, text: String) -> String;
}

/// Leaves captions untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Normalizer for Identity {
    fn normalize(&self, text: String) -> String {
        text
    }
}

/// Repairs indefinite articles against the word that follows them and
/// collapses runs of whitespace into single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

/// Consonant spellings with a silent opening "h".
const AN_CONSONANT_PREFIXES: &[&str] = &["heir", "honest", "honor", "honour", "hour"];

/// Vowel spellings that open with a consonant sound ("a european",
/// "a one-armed bandit", "a unicorn").
const A_VOWEL_PREFIXES: &[&str] = &["eu", "ewe", "once", "one", "ufo", "use", "usu", "uto"];

/// Letters whose spoken names start with a vowel sound ("an X").
const AN_SINGLE_LETTERS: &[char] = &[
    'a', 'e', 'f', 'h', 'i', 'l', 'm', 'n', 'o', 'r', 's', 'x',
];

/// Decide whether the word following an article calls for "an".
fn wants_an(next_word: &str) -> bool {
    let probe: String = next_word
        .chars()
        .skip_while(|c| !c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    let Some(first) = probe.chars().next() else {
        return false;
    };

    if first.is_ascii_digit() {
        // "an 8", "an 11th", "an 1800s relic"; other numbers open with
        // a consonant sound.
        let digits: String = probe.chars().take_while(|c| c.is_ascii_digit()).collect();
        return digits.starts_with('8') || digits.starts_with("11") || digits.starts_with("18");
    }

    // A lone letter is read out by name.
    let letters = probe.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    if letters == 1 {
        return AN_SINGLE_LETTERS.contains(&first);
    }

    if "aeiou".contains(first) {
        if A_VOWEL_PREFIXES.iter().any(|p| probe.starts_with(p)) {
            return false;
        }
        // "uni" splits by pronunciation: un-prefixed words keep the
        // vowel sound ("an uninvited"), the rest read as "yoo"
        // ("a unicorn", "a uniform").
        if probe.starts_with("uni") {
            return matches!(probe.as_bytes().get(3).copied(), Some(b'n' | b'm' | b'd'));
        }
        return true;
    }

    AN_CONSONANT_PREFIXES.iter().any(|p| probe.starts_with(p))
}

impl Normalizer for English {
    fn normalize(&self, text: String) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut out: Vec<String> = Vec::with_capacity(words.len());

        for (index, word) in words.iter().enumerate() {
            let capital = match *word {
                "a" | "an" => Some(false),
                "A" | "An" => Some(true),
                _ => None,
            };
            match (capital, words.get(index + 1)) {
                (Some(capital), Some(next)) => {
                    let article = match (capital, wants_an(next)) {
                        (false, false) => "a",
                        (false, true) => "an",
                        (true, false) => "A",
                        (true, true) => "An",
                    };
                    out.push(article.to_string());
                }
                _ => out.push((*word).to_string()),
            }
        }

        out.join(" ")
    }
}
