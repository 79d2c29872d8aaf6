/// Locale-aware string comparison for user-facing ordering
use std::cmp::Ordering;

/// Compare two strings the way the user's locale orders them.
///
/// In the browser this is `Intl.Collator` with the default locale. Elsewhere
/// a diacritic- and case-insensitive comparison stands in, falling back to
/// plain code point order to break ties.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    #[cfg(target_arch = "wasm32")]
    {
        intl::compare(a, b).unwrap_or_else(|| fallback_compare(a, b))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        fallback_compare(a, b)
    }
}

#[cfg(target_arch = "wasm32")]
mod intl {
    use std::cmp::Ordering;
    use wasm_bindgen::JsValue;

    thread_local! {
        static COLLATOR: js_sys::Intl::Collator =
            js_sys::Intl::Collator::new(&js_sys::Array::new(), &js_sys::Object::new());
    }

    pub fn compare(a: &str, b: &str) -> Option<Ordering> {
        COLLATOR.with(|collator| {
            let result = collator
                .compare()
                .call2(&JsValue::NULL, &JsValue::from_str(a), &JsValue::from_str(b))
                .ok()?
                .as_f64()?;
            result.partial_cmp(&0.0)
        })
    }
}

fn fallback_compare(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Primary-strength key: accents stripped, lowercase
fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(|c| c.to_lowercase())
        .filter(|c| !is_combining_mark(*c))
        .map(fold_diacritic)
        .collect()
}

// Combining Diacritical Marks block, as left behind by decomposed (NFD) text
fn is_combining_mark(c: char) -> bool {
    ('\u{300}'..='\u{36f}').contains(&c)
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}
