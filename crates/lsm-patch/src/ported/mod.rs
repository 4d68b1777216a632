//! Migrated patch-module routines of the 2D level-set examples.

mod init_circle;

pub use init_circle::{fill_signed_distance, init_circle, init_circle_raw};

/// Legacy routines that have a Rust port, by Fortran routine name.
pub const PORTED_ROUTINES: &[&str] = &["initcircle"];

pub fn is_ported(routine: &str) -> bool {
    let name = routine.trim().trim_end_matches('_').to_ascii_lowercase();
    PORTED_ROUTINES.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use super::is_ported;

    #[test]
    fn lookup_ignores_case_and_fortran_suffix() {
        assert!(is_ported("initcircle"));
        assert!(is_ported("initcircle_"));
        assert!(is_ported("INITCIRCLE"));
        assert!(!is_ported("reinitialize"));
    }
}
