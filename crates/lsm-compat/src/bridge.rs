use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use lsm_patch::ported::init_circle_raw;
use lsm_patch::{IndexBox2, PatchError, Real};
use thiserror::Error;
use tracing::debug;

use crate::symbols::{LegacyLanguage, canonical_symbol, fortran_symbol, macro_symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallingConvention {
    C,
    Fortran,
}

/// Argument class checked by [`CompatRegistry::call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Integer,
    Real,
}

impl Display for ArgKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgKind::Integer => write!(f, "integer"),
            ArgKind::Real => write!(f, "real"),
        }
    }
}

/// Shape of a legacy patch routine: one field buffer followed by the
/// flattened integer and real arguments in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineSpec {
    pub symbol: String,
    pub convention: CallingConvention,
    pub int_args: usize,
    pub real_args: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompatError {
    #[error("routine not registered: {symbol}")]
    RoutineNotRegistered { symbol: String },

    #[error("invalid {kind} argument count for {symbol}: expected {expected}, got {got}")]
    InvalidArgumentCount {
        symbol: String,
        kind: ArgKind,
        expected: usize,
        got: usize,
    },

    #[error("routine invocation failed for {symbol}: {source}")]
    InvocationFailed {
        symbol: String,
        #[source]
        source: PatchError,
    },
}

pub type PatchRoutine =
    Arc<dyn Fn(&mut [Real], &[i32], &[Real]) -> Result<(), PatchError> + Send + Sync + 'static>;

#[derive(Default)]
pub struct CompatRegistry {
    routines: BTreeMap<String, (RoutineSpec, PatchRoutine)>,
}

impl CompatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_c(
        &mut self,
        symbol: &str,
        int_args: usize,
        real_args: usize,
        routine: PatchRoutine,
    ) {
        self.register_internal(symbol, CallingConvention::C, int_args, real_args, routine);
    }

    pub fn register_fortran(
        &mut self,
        symbol: &str,
        int_args: usize,
        real_args: usize,
        routine: PatchRoutine,
    ) {
        self.register_internal(
            symbol,
            CallingConvention::Fortran,
            int_args,
            real_args,
            routine,
        );
    }

    pub fn spec(&self, symbol: &str) -> Option<&RoutineSpec> {
        self.resolve_symbol(symbol)
            .and_then(|resolved| self.routines.get(&resolved))
            .map(|entry| &entry.0)
    }

    pub fn specs(&self) -> impl Iterator<Item = &RoutineSpec> {
        self.routines.values().map(|entry| &entry.0)
    }

    pub fn call(
        &self,
        symbol: &str,
        field: &mut [Real],
        ints: &[i32],
        reals: &[Real],
    ) -> Result<(), CompatError> {
        let resolved =
            self.resolve_symbol(symbol)
                .ok_or_else(|| CompatError::RoutineNotRegistered {
                    symbol: symbol.to_string(),
                })?;
        let Some((spec, routine)) = self.routines.get(&resolved) else {
            return Err(CompatError::RoutineNotRegistered { symbol: resolved });
        };

        for (kind, expected, got) in [
            (ArgKind::Integer, spec.int_args, ints.len()),
            (ArgKind::Real, spec.real_args, reals.len()),
        ] {
            if expected != got {
                return Err(CompatError::InvalidArgumentCount {
                    symbol: resolved,
                    kind,
                    expected,
                    got,
                });
            }
        }

        debug!(symbol = %resolved, cells = field.len(), "routing legacy call");
        routine(field, ints, reals).map_err(|source| CompatError::InvocationFailed {
            symbol: resolved,
            source,
        })
    }

    fn register_internal(
        &mut self,
        symbol: &str,
        convention: CallingConvention,
        int_args: usize,
        real_args: usize,
        routine: PatchRoutine,
    ) {
        let language = match convention {
            CallingConvention::C => LegacyLanguage::C,
            CallingConvention::Fortran => LegacyLanguage::Fortran,
        };
        let canonical = canonical_symbol(symbol, language);
        let spec = RoutineSpec {
            symbol: canonical.clone(),
            convention,
            int_args,
            real_args,
        };
        debug!(symbol = %canonical, ?convention, "registered legacy routine");
        self.routines.insert(canonical, (spec, routine));
    }

    fn resolve_symbol(&self, symbol: &str) -> Option<String> {
        if self.routines.contains_key(symbol) {
            return Some(symbol.to_string());
        }

        [
            canonical_symbol(symbol, LegacyLanguage::C),
            fortran_symbol(symbol),
            macro_symbol(symbol),
        ]
        .into_iter()
        .find(|candidate| self.routines.contains_key(candidate))
    }
}

/// Registry with every ported patch routine under its legacy symbol.
pub fn default_registry() -> CompatRegistry {
    let mut registry = CompatRegistry::new();
    registry.register_fortran("initcircle", 8, 7, Arc::new(call_init_circle));
    registry
}

/// Unpacks `INIT_CIRCLE` arguments: ghost box and fill box bounds as
/// integers, then `x_lower[2]`, `dx[2]`, `center[2]` and `radius` as reals.
fn call_init_circle(field: &mut [Real], ints: &[i32], reals: &[Real]) -> Result<(), PatchError> {
    let ghost_box = IndexBox2::from_bounds([ints[0], ints[1], ints[2], ints[3]]);
    let fill_box = IndexBox2::from_bounds([ints[4], ints[5], ints[6], ints[7]]);
    init_circle_raw(
        field,
        ghost_box,
        fill_box,
        [reals[0], reals[1]],
        [reals[2], reals[3]],
        [reals[4], reals[5]],
        reals[6],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Real = 64.0 * Real::EPSILON;

    fn noop() -> PatchRoutine {
        Arc::new(|_, _, _| Ok(()))
    }

    #[test]
    fn registers_and_calls_fortran_routine() {
        let mut registry = CompatRegistry::new();
        registry.register_fortran(
            "SCALE",
            0,
            1,
            Arc::new(|field, _, reals| {
                field.iter_mut().for_each(|v| *v *= reals[0]);
                Ok(())
            }),
        );

        let mut field = vec![1.0, 2.0];
        registry
            .call("scale_", &mut field, &[], &[3.0])
            .expect("call should succeed");
        assert_eq!(field, vec![3.0, 6.0]);
    }

    #[test]
    fn resolves_macro_alias_to_registered_routine() {
        let registry = default_registry();
        let spec = registry.spec("INIT_CIRCLE").expect("alias should resolve");
        assert_eq!(spec.symbol, "initcircle_");
        assert_eq!(spec.int_args, 8);
        assert_eq!(spec.real_args, 7);
        assert_eq!(spec.convention, CallingConvention::Fortran);
    }

    #[test]
    fn default_registry_initializes_circle() {
        let registry = default_registry();
        let mut field = vec![0.0; 16];
        registry
            .call(
                "INIT_CIRCLE",
                &mut field,
                &[0, 3, 0, 3, 1, 2, 1, 2],
                &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 1.0],
            )
            .expect("init_circle should run");

        // fill box corners (1,1) and (2,2) centred at (1.5,1.5) and (2.5,2.5)
        let expected = (0.5 as Real).hypot(0.5) - 1.0;
        assert!((field[5] - expected).abs() < TOL);
        assert!((field[10] - expected).abs() < TOL);
        assert_eq!(field[0], 0.0);
        assert_eq!(field[15], 0.0);
    }

    #[test]
    fn validates_argument_counts() {
        let registry = default_registry();
        let mut field = vec![0.0; 4];
        let err = registry
            .call("initcircle_", &mut field, &[0, 1, 0, 1], &[0.0; 7])
            .expect_err("four integers are not enough");
        assert_eq!(
            err,
            CompatError::InvalidArgumentCount {
                symbol: "initcircle_".to_string(),
                kind: ArgKind::Integer,
                expected: 8,
                got: 4
            }
        );

        let err = registry
            .call("initcircle_", &mut field, &[0, 1, 0, 1, 0, 1, 0, 1], &[0.0; 6])
            .expect_err("six reals are not enough");
        assert!(matches!(
            err,
            CompatError::InvalidArgumentCount {
                kind: ArgKind::Real,
                ..
            }
        ));
    }

    #[test]
    fn surfaces_kernel_errors() {
        let registry = default_registry();
        let mut field = vec![0.0; 4];
        let err = registry
            .call(
                "initcircle",
                &mut field,
                &[0, 1, 0, 1, 0, 1, 0, 1],
                &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            )
            .expect_err("dx = 0 should fail");
        assert!(matches!(
            err,
            CompatError::InvocationFailed {
                source: PatchError::InvalidSpacing { .. },
                ..
            }
        ));
    }

    #[test]
    fn returns_not_registered_error() {
        let registry = CompatRegistry::new();
        let err = registry
            .call("missing_symbol", &mut [], &[], &[])
            .expect_err("missing routine should fail");
        assert_eq!(
            err,
            CompatError::RoutineNotRegistered {
                symbol: "missing_symbol".to_string()
            }
        );
    }

    #[test]
    fn lists_registered_specs_in_symbol_order() {
        let mut registry = CompatRegistry::new();
        registry.register_c("b_routine", 1, 0, noop());
        registry.register_fortran("A", 0, 1, noop());
        let symbols: Vec<_> = registry.specs().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["a_", "b_routine"]);
    }
}
