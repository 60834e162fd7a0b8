//! Language code normalisation
//!
//! Request logs carry a mix of two-letter and three-letter codes for the same
//! language (`en` and `eng`, `oc_aran` and `oci_aran`). Both spellings are
//! folded onto the three-letter form so pair statistics are not split.

/// Short and long spellings mapped to their canonical code.
const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("en", "eng"),
    ("eng", "eng"),
    ("ca", "cat"),
    ("cat", "cat"),
    ("ca_valencia", "cat_valencia"),
    ("cat_valencia", "cat_valencia"),
    ("es", "spa"),
    ("spa", "spa"),
    ("fr", "fra"),
    ("fra", "fra"),
    ("pt", "por"),
    ("por", "por"),
    ("it", "ita"),
    ("ita", "ita"),
    ("oc", "oci"),
    ("oci", "oci"),
    ("oc_aran", "oci_aran"),
    ("oci_aran", "oci_aran"),
];

/// Canonical code for `code`, or `code` itself when it is not in the table.
pub fn normalize(code: &str) -> &str {
    LANGUAGE_CODES
        .iter()
        .find(|(raw, _)| *raw == code)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(code)
}
