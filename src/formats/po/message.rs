//! Conversion of an ordinary unit into a [`LocalizedString`].

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    formats::po::{lexer::CommentKind, unit::Unit},
    types::{Gender, LocalizedString},
};

lazy_static! {
    static ref MESSAGE_KEY_REGEX: Regex =
        Regex::new(r"^msg(id|id_plural|str|str\[(\d+)\]|ctxt)$").unwrap();
}

/// Context phrases that mark a grammatical gender, matched in this order.
const GENDER_PHRASES: [(&str, Gender); 4] = [
    ("masculine form", Gender::Masculine),
    ("feminine form", Gender::Feminine),
    ("gender-masculine", Gender::Masculine),
    ("gender-feminine", Gender::Feminine),
];

/// Builds a [`LocalizedString`] from a unit that is not the catalog header.
pub fn parse_message(unit: Unit) -> LocalizedString {
    let mut string = LocalizedString::default();
    let mut translated_values = BTreeMap::new();

    for message in unit.messages {
        let Some(captures) = MESSAGE_KEY_REGEX.captures(&message.identifier) else {
            continue;
        };
        match &captures[1] {
            "id" => string.untranslated_singular_value = Some(message.value),
            "id_plural" => string.untranslated_plural_value = Some(message.value),
            "str" => {
                translated_values.insert(0, message.value);
            }
            "ctxt" => string.context = Some(message.value.trim().to_string()),
            _ => {
                // `str[N]`; the lexer rejects indices that don't fit in usize.
                if let Some(index) = captures.get(2).and_then(|m| m.as_str().parse().ok()) {
                    translated_values.insert(index, message.value);
                }
            }
        }
    }
    if !translated_values.is_empty() {
        string.translated_values = Some(translated_values);
    }

    let mut developer = Vec::new();
    let mut translator = Vec::new();
    let mut references = Vec::new();
    let mut flags = Vec::new();
    for (kind, text) in &unit.comments {
        let text = text.trim();
        match kind {
            CommentKind::Extracted => developer.push(text),
            CommentKind::Translator => translator.push(text),
            CommentKind::Reference => references.push(text),
            CommentKind::Flag => flags.push(text),
            CommentKind::Other => {}
        }
    }
    string.developer_comments = non_empty(developer.join("\n"));
    string.translator_comments = non_empty(translator.join("\n"));
    string.references = non_empty(references.join(" "))
        .map(|joined| joined.split_whitespace().map(str::to_string).collect());

    let flags: Vec<String> = flags
        .join(",")
        .split(',')
        .map(str::trim)
        .filter(|flag| !flag.is_empty())
        .map(str::to_string)
        .collect();
    string.string_format_hint = flags
        .iter()
        .rev()
        .find(|flag| flag.ends_with("-format"))
        .cloned();
    if !flags.is_empty() {
        string.flags = Some(flags);
    }

    if let Some((gender, consumed)) = string.context.as_deref().map(infer_gender) {
        string.gender = gender;
        if consumed {
            string.context = None;
        }
    }

    string
}

/// Returns the gender named by `context`, and whether the phrase was the whole context.
fn infer_gender(context: &str) -> (Option<Gender>, bool) {
    let folded = context.to_lowercase();
    if let Some((_, gender)) = GENDER_PHRASES.iter().find(|(phrase, _)| folded == *phrase) {
        return (Some(*gender), true);
    }
    let gender = GENDER_PHRASES
        .iter()
        .find(|(phrase, _)| context.contains(phrase))
        .map(|(_, gender)| *gender);
    (gender, false)
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
