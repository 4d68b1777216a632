#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyLanguage {
    C,
    Fortran,
}

/// One `#define NAME symbol_` line of a patch-module header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroBinding {
    pub macro_name: String,
    pub linker_symbol: String,
}

pub fn canonical_symbol(name: &str, language: LegacyLanguage) -> String {
    match language {
        LegacyLanguage::C => sanitize_symbol(name),
        LegacyLanguage::Fortran => fortran_symbol(name),
    }
}

/// Lower-case name with the single trailing underscore of the Fortran ABI.
pub fn fortran_symbol(name: &str) -> String {
    let lowered = sanitize_symbol(name).to_ascii_lowercase();
    match lowered.strip_suffix('_') {
        Some(_) => lowered,
        None => lowered + "_",
    }
}

/// Linker symbol behind an upper-case C macro alias such as `INIT_CIRCLE`.
///
/// Patch-module headers spell Fortran routines in macro case with word
/// separators; the routine itself has none, so `INIT_CIRCLE` binds to
/// `initcircle_`.
pub fn macro_symbol(name: &str) -> String {
    let joined: String = sanitize_symbol(name)
        .trim_end_matches('_')
        .chars()
        .filter(|ch| *ch != '_')
        .collect();
    fortran_symbol(&joined)
}

/// Collects the name bindings declared in a legacy header.
///
/// Include guards (`#define included_x` with no value) and function-like
/// macros are skipped.
pub fn parse_macro_bindings(header: &str) -> Vec<MacroBinding> {
    header
        .lines()
        .filter_map(|line| {
            let rest = line.trim_start().strip_prefix('#')?.trim_start();
            let rest = rest.strip_prefix("define")?;
            let mut parts = rest.split_whitespace();
            let name = parts.next()?;
            let value = parts.next()?;
            if parts.next().is_some() || name.contains('(') || !is_identifier(value) {
                return None;
            }
            Some(MacroBinding {
                macro_name: name.to_string(),
                linker_symbol: value.to_string(),
            })
        })
        .collect()
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(ch) if ch.is_ascii_alphabetic() || ch == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn sanitize_symbol(name: &str) -> String {
    name.trim()
        .trim_end_matches('\0')
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_c_symbols() {
        assert_eq!(
            canonical_symbol(" init_circle\0", LegacyLanguage::C),
            "init_circle"
        );
    }

    #[test]
    fn canonicalizes_fortran_symbols() {
        assert_eq!(
            canonical_symbol("INITCIRCLE", LegacyLanguage::Fortran),
            "initcircle_"
        );
        assert_eq!(fortran_symbol("initcircle_"), "initcircle_");
    }

    #[test]
    fn maps_macro_alias_to_linker_symbol() {
        assert_eq!(macro_symbol("INIT_CIRCLE"), "initcircle_");
        assert_eq!(macro_symbol("initcircle_"), "initcircle_");
    }

    #[test]
    fn parses_bindings_and_skips_guards() {
        let header = "\
#ifndef included_fieldextension2d_patchmodule
#define included_fieldextension2d_patchmodule

#include \"LSMLIB_config.h\"

#define INIT_CIRCLE           initcircle_
  #  define SQR(x) ((x)*(x))
#define TOLERANCE 1.0e-6
";
        assert_eq!(
            parse_macro_bindings(header),
            vec![MacroBinding {
                macro_name: "INIT_CIRCLE".to_string(),
                linker_symbol: "initcircle_".to_string(),
            }]
        );
    }
}
