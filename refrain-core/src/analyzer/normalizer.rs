/// Configuration options for text normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizerConfig {
    /// When enabled, strips diacritical marks from Latin characters.
    /// For example, "café" becomes "cafe".
    pub strip_diacritics: bool,
}

/// Lyric text normalizer.
///
/// Performs the following operations:
/// - Converts all characters to lowercase (Unicode-aware)
/// - Deletes apostrophes and combining marks, so "don't" becomes "dont"
/// - Treats every other non-alphanumeric character as a word break
/// - Collapses word breaks into single spaces, with none leading or trailing
/// - Optionally strips diacritical marks from Latin characters
///
/// # Examples
///
/// ```
/// use refrain_core::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("  Rolling, in the DEEP!  "), "rolling in the deep");
///
/// let stripper = TextNormalizer::new(NormalizerConfig { strip_diacritics: true });
/// assert_eq!(stripper.normalize("Café"), "cafe");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let strip = self.config.strip_diacritics;
        let mut pending_space = false;

        for ch in input.chars() {
            if is_elided(ch) {
                continue;
            }
            if !ch.is_alphanumeric() {
                pending_space = !out.is_empty();
                continue;
            }

            for lowered in ch.to_lowercase() {
                let folded = if strip { fold_latin1(lowered) } else { lowered };
                if is_elided(folded) {
                    continue;
                }
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(folded);
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

/// Characters removed without breaking the surrounding word.
#[inline(always)]
fn is_elided(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '\u{02BC}') || ('\u{0300}'..='\u{036F}').contains(&c)
}

#[inline(always)]
fn fold_latin1(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => 'a',

        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => 'c',

        'ð' | 'đ' => 'd',

        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',

        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',

        'ñ' | 'ń' | 'ň' | 'ņ' => 'n',

        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' | 'ŏ' | 'ő' | 'ø' => 'o',

        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',

        'ý' | 'ÿ' => 'y',

        'ś' | 'š' | 'ş' | 'ß' => 's',

        'ź' | 'ž' | 'ż' => 'z',

        'ł' => 'l',
        'æ' => 'a',
        'œ' => 'o',

        _ => c,
    }
}
