//! Info.plist editing for Dash compatibility.
//!
//! Dash only treats a docset's search index as authoritative when the
//! bundle's `Info.plist` carries `isDashDocset = true`. The plist is edited
//! as text so the rest of the file keeps its exact formatting.

use std::path::{Path, PathBuf};

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::AppError;

/// Key Dash reads from the top-level plist dict.
pub const DASH_DOCSET_KEY: &str = "isDashDocset";

/// What [`set_dash_flag`] did to the plist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistUpdate {
    /// The key was missing and has been added.
    Inserted,
    /// The key existed with another value, now `<true/>`.
    Replaced,
    /// The key was already `<true/>`.
    Unchanged,
}

/// `Info.plist` location for a docset index at `db_path`.
///
/// Docsets keep the index at `X.docset/Contents/Resources/docSet.dsidx` and
/// the plist at `X.docset/Contents/Info.plist`, two levels up.
pub fn info_plist_path(db_path: &Path) -> Option<PathBuf> {
    let contents = db_path.parent()?.parent()?;
    Some(contents.join("Info.plist"))
}

/// Set the Dash flag in the plist at `plist_path`, rewriting the file only
/// when something changed.
pub fn mark_dash_docset(plist_path: &Path) -> Result<PlistUpdate, AppError> {
    let text = std::fs::read_to_string(plist_path)?;
    let (updated, outcome) = set_dash_flag(&text)?;

    if outcome != PlistUpdate::Unchanged {
        std::fs::write(plist_path, updated)?;
    }
    Ok(outcome)
}

/// Return `text` with `isDashDocset` set to `<true/>` in the top-level dict.
pub fn set_dash_flag(text: &str) -> Result<(String, PlistUpdate), AppError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)
        .map_err(|e| AppError::Plist(format!("invalid XML: {}", e)))?;

    let root = doc.root_element();
    if !root.has_tag_name("plist") {
        return Err(AppError::Plist(format!(
            "expected <plist> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let dict = root
        .children()
        .find(|n| n.has_tag_name("dict"))
        .ok_or_else(|| AppError::Plist("missing top-level <dict>".to_string()))?;

    let mut elements = dict.children().filter(Node::is_element);
    while let Some(key) = elements.next() {
        if !key.has_tag_name("key") {
            continue;
        }
        let value = elements.next();
        if key.text().map(str::trim) != Some(DASH_DOCSET_KEY) {
            continue;
        }

        let value = value.ok_or_else(|| {
            AppError::Plist(format!("<key>{}</key> has no value", DASH_DOCSET_KEY))
        })?;
        if value.has_tag_name("true") {
            return Ok((text.to_string(), PlistUpdate::Unchanged));
        }

        let range = value.range();
        let updated = format!("{}<true/>{}", &text[..range.start], &text[range.end..]);
        return Ok((updated, PlistUpdate::Replaced));
    }

    let entry = format!("\t<key>{}</key>\n\t<true/>\n", DASH_DOCSET_KEY);
    let range = dict.range();
    let dict_text = &text[range.clone()];

    let updated = match dict_text.rfind("</dict>") {
        Some(close) => {
            let at = range.start + close;
            format!("{}{}{}", &text[..at], entry, &text[at..])
        }
        // Self-closing `<dict/>`.
        None => format!(
            "{}<dict>\n{}</dict>{}",
            &text[..range.start],
            entry,
            &text[range.end..]
        ),
    };

    Ok((updated, PlistUpdate::Inserted))
}
