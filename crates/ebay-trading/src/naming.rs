// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion between local (`category_id`) and wire (`CategoryID`) names.
//!
//! The wire convention is the one used by the Trading schema: capitalized
//! segments, no separator, and `ID` spelled in upper case. Local names are
//! what application code uses for instance attributes.

/// Convert a local, underscore separated name to the wire convention.
///
/// Segments are capitalized (only the first character is touched) and a
/// segment equal to `id` in any case becomes `ID`. Names that are already in
/// wire form pass through unchanged, so the conversion is idempotent.
///
/// ```
/// use ebay_trading::naming::to_wire_name;
///
/// assert_eq!(to_wire_name("category_id"), "CategoryID");
/// assert_eq!(to_wire_name("HelloWorld"), "HelloWorld");
/// ```
pub fn to_wire_name(name: &str) -> String {
    let mut wire = String::with_capacity(name.len());
    for segment in name.split('_') {
        if segment.eq_ignore_ascii_case("id") {
            wire.push_str("ID");
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            wire.extend(first.to_uppercase());
            wire.push_str(chars.as_str());
        }
    }
    wire
}

/// Convert a wire name to the local convention.
///
/// Acronym runs are kept together (`CategoryID` -> `category_id`,
/// `XMLParser` -> `xml_parser`). Names without upper-case characters are
/// returned unchanged. This is not a strict inverse of [`to_wire_name`];
/// schema lookups fall back to case-insensitive matching instead.
pub fn to_local_name(name: &str) -> String {
    if is_local_name(name) {
        return name.to_string();
    }

    let chars: Vec<char> = name.chars().collect();
    let mut local = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '.' {
            local.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !local.ends_with('_') {
                local.push('_');
            }
        }
        local.extend(c.to_lowercase());
    }
    local
}

/// True when `name` already follows the local convention.
pub fn is_local_name(name: &str) -> bool {
    !name.chars().any(char::is_uppercase)
}
