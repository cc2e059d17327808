//! Storage naming: table identifiers and column names.
//!
//! Table names follow the usual English pluralization tables (irregular
//! words, uncountable words, then suffix rules), applied to the whole type
//! name before snake-casing.

use heck::ToSnakeCase;
use regex::Regex;
use std::sync::OnceLock;

/// Singular to plural pairs matched against the whole word.
const IRREGULAR: &[(&str, &str)] = &[
    ("i", "we"),
    ("me", "us"),
    ("he", "they"),
    ("she", "they"),
    ("them", "them"),
    ("myself", "ourselves"),
    ("yourself", "yourselves"),
    ("itself", "themselves"),
    ("herself", "themselves"),
    ("himself", "themselves"),
    ("themself", "themselves"),
    ("is", "are"),
    ("was", "were"),
    ("has", "have"),
    ("this", "these"),
    ("that", "those"),
    ("echo", "echoes"),
    ("dingo", "dingoes"),
    ("volcano", "volcanoes"),
    ("tornado", "tornadoes"),
    ("torpedo", "torpedoes"),
    ("genus", "genera"),
    ("viscus", "viscera"),
    ("stigma", "stigmata"),
    ("stoma", "stomata"),
    ("dogma", "dogmata"),
    ("lemma", "lemmata"),
    ("schema", "schemata"),
    ("anathema", "anathemata"),
    ("ox", "oxen"),
    ("axe", "axes"),
    ("die", "dice"),
    ("yes", "yeses"),
    ("foot", "feet"),
    ("eave", "eaves"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("quiz", "quizzes"),
    ("human", "humans"),
    ("proof", "proofs"),
    ("carve", "carves"),
    ("valve", "valves"),
    ("looey", "looies"),
    ("thief", "thieves"),
    ("groove", "grooves"),
    ("pickaxe", "pickaxes"),
    ("passerby", "passersby"),
];

const UNCOUNTABLE: &[&str] = &[
    "adulthood",
    "advice",
    "agenda",
    "aid",
    "aircraft",
    "alcohol",
    "ammo",
    "analytics",
    "anime",
    "athletics",
    "audio",
    "bison",
    "blood",
    "bream",
    "buffalo",
    "butter",
    "carp",
    "cash",
    "chassis",
    "chess",
    "clothing",
    "cod",
    "commerce",
    "cooperation",
    "corps",
    "debris",
    "diabetes",
    "digestion",
    "elk",
    "energy",
    "equipment",
    "excretion",
    "expertise",
    "firmware",
    "flounder",
    "fun",
    "gallows",
    "garbage",
    "graffiti",
    "hardware",
    "headquarters",
    "health",
    "herpes",
    "highjinks",
    "homework",
    "housework",
    "information",
    "jeans",
    "justice",
    "kudos",
    "labour",
    "literature",
    "machinery",
    "mackerel",
    "mail",
    "media",
    "mews",
    "moose",
    "music",
    "mud",
    "manga",
    "news",
    "only",
    "personnel",
    "pike",
    "plankton",
    "pliers",
    "police",
    "pollution",
    "premises",
    "rain",
    "research",
    "rice",
    "salmon",
    "scissors",
    "series",
    "sewage",
    "shambles",
    "shrimp",
    "software",
    "staff",
    "swine",
    "tennis",
    "traffic",
    "transportation",
    "trout",
    "tuna",
    "wealth",
    "welfare",
    "whiting",
    "wildebeest",
    "wildlife",
    "you",
];

/// Suffix rules in ascending priority: the last matching rule wins.
/// Replacements use `${n}` capture references.
const PLURAL_RULES: &[(&str, &str)] = &[
    (r"s?$", "s"),
    (r"[^\x00-\x7F]$", "${0}"),
    (r"([^aeiou]ese)$", "${1}"),
    (r"(ax|test)is$", "${1}es"),
    (r"(alias|[^aou]us|t[lm]as|gas|ris)$", "${1}es"),
    (r"(e[mn]u)s?$", "${1}s"),
    (r"([^l]ias|[aeiou]las|[ejzr]as|[iu]am)$", "${1}"),
    (
        r"(alumn|syllab|vir|radi|nucle|fung|cact|stimul|termin|bacill|foc|uter|loc|strat)(?:us|i)$",
        "${1}i",
    ),
    (r"(alumn|alg|vertebr)(?:a|ae)$", "${1}ae"),
    (r"(seraph|cherub)(?:im)?$", "${1}im"),
    (r"(her|at|gr)o$", "${1}oes"),
    (
        r"(agend|addend|millenni|dat|extrem|bacteri|desiderat|strat|candelabr|errat|ov|symposi|curricul|automat|quor)(?:a|um)$",
        "${1}a",
    ),
    (
        r"(apheli|hyperbat|periheli|asyndet|noumen|phenomen|criteri|organ|prolegomen|hedr|automat)(?:a|on)$",
        "${1}a",
    ),
    (r"sis$", "ses"),
    (r"(?:(kni|wi|li)fe|(ar|l|ea|eo|oa|hoo)f)$", "${1}${2}ves"),
    (r"([^aeiouy]|qu)y$", "${1}ies"),
    (r"([^ch][ieo][ln])ey$", "${1}ies"),
    (r"(x|ch|ss|sh|zz)$", "${1}es"),
    (r"(matr|cod|mur|sil|vert|ind|append)(?:ix|ex)$", "${1}ices"),
    (r"\b((?:tit)?m|l)(?:ice|ouse)$", "${1}ice"),
    (r"(pe)(?:rson|ople)$", "${1}ople"),
    (r"(child)(?:ren)?$", "${1}ren"),
    (r"eaux$", "${0}"),
    (r"m[ae]n$", "men"),
    (r"^thou$", "you"),
    // Uncountable endings outrank every suffix rule.
    (r"pok[eé]mon$", "${0}"),
    (r"[^aeiou]ese$", "${0}"),
    (r"deer$", "${0}"),
    (r"fish$", "${0}"),
    (r"measles$", "${0}"),
    (r"o[iu]s$", "${0}"),
    (r"pox$", "${0}"),
    (r"sheep$", "${0}"),
];

fn plural_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        PLURAL_RULES
            .iter()
            .map(|(pattern, replacement)| {
                let re = Regex::new(&format!("(?i){pattern}"))
                    .expect("invalid built-in pluralization rule");
                (re, *replacement)
            })
            .collect()
    })
}

/// Table identifier for a resource type: pluralized, then snake-cased.
///
/// ```
/// assert_eq!(jaorm::table_name("company"), "companies");
/// assert_eq!(jaorm::table_name("userProfile"), "user_profiles");
/// ```
pub fn table_name(type_name: &str) -> String {
    pluralize(type_name).to_snake_case()
}

/// Column name for a model attribute.
pub fn column_name(attribute: &str) -> String {
    attribute.to_snake_case()
}

/// English plural of `word`, keeping its letter case.
///
/// Only the end of the word is rewritten, so compound names pluralize
/// their last part (`salesPerson` becomes `salesPeople`).
pub fn pluralize(word: &str) -> String {
    let token = word.to_lowercase();
    if token.is_empty() || UNCOUNTABLE.contains(&token.as_str()) {
        return word.to_string();
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == token) {
        return restore_case(word, &token);
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == token) {
        return restore_case(word, plural);
    }

    for (re, replacement) in plural_rules().iter().rev() {
        let Some(caps) = re.captures(word) else {
            continue;
        };
        let Some(matched) = caps.get(0) else {
            continue;
        };
        let mut expanded = String::new();
        caps.expand(replacement, &mut expanded);

        // An empty match takes its case from the character before it.
        let case_of = if matched.as_str().is_empty() {
            word[..matched.start()]
                .chars()
                .last()
                .map(String::from)
                .unwrap_or_default()
        } else {
            matched.as_str().to_string()
        };
        return format!(
            "{}{}{}",
            &word[..matched.start()],
            restore_case(&case_of, &expanded),
            &word[matched.end()..]
        );
    }
    word.to_string()
}

/// Give `token` the letter case of `word`.
fn restore_case(word: &str, token: &str) -> String {
    if word == token {
        return token.to_string();
    }
    if word == word.to_lowercase() {
        return token.to_lowercase();
    }
    if word == word.to_uppercase() {
        return token.to_uppercase();
    }

    let mut chars = word.chars();
    let capitalized = chars.next().is_some_and(char::is_uppercase)
        && chars.as_str() == chars.as_str().to_lowercase();
    if capitalized {
        let mut token_chars = token.chars();
        return match token_chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(token_chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        };
    }
    token.to_lowercase()
}
