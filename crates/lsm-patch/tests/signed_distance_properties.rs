//! Property tests for circle initialization over random patches.
//!
//! Checked invariants:
//! - every fill-box value matches the cell-centred distance formula
//! - cells outside the fill box keep their previous value
//! - sign follows inside/outside of the circle
//! - shifting origin and centre together leaves the field unchanged

use lsm_patch::ported::init_circle;
use lsm_patch::{Circle, IndexBox2, PatchData, PatchGeometry, Real};
use nalgebra::Vector2;
use proptest::prelude::*;

const SENTINEL: Real = -9999.0;

/// Rounding allowance for values of the given magnitude at the build's
/// precision.
fn tol(magnitude: Real) -> Real {
    64.0 * Real::EPSILON * (1.0 + magnitude)
}

#[derive(Debug, Clone)]
struct Case {
    ghost: IndexBox2,
    fill: IndexBox2,
    x_lower: [Real; 2],
    dx: [Real; 2],
    center: [Real; 2],
    radius: Real,
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (
        (-20i32..20, 1i32..16, -20i32..20, 1i32..16),
        (0i32..4, 0i32..4, 0i32..4, 0i32..4),
        (-5.0..5.0 as Real, -5.0..5.0 as Real),
        (0.01..1.0 as Real, 0.01..1.0 as Real),
        (-5.0..5.0 as Real, -5.0..5.0 as Real),
        0.0..3.0 as Real,
    )
        .prop_map(
            |((ilo, ni, jlo, nj), (a, b, c, d), xl, spacing, center, radius)| {
                let ghost = IndexBox2::new(ilo, ilo + ni + 7, jlo, jlo + nj + 7);
                let fill = IndexBox2::new(
                    ghost.ilo + a,
                    ghost.ihi - b,
                    ghost.jlo + c,
                    ghost.jhi - d,
                );
                Case {
                    ghost,
                    fill,
                    x_lower: [xl.0, xl.1],
                    dx: [spacing.0, spacing.1],
                    center: [center.0, center.1],
                    radius,
                }
            },
        )
}

impl Case {
    /// Largest coordinate magnitude a sample or the centre can reach.
    fn coordinate_scale(&self) -> Real {
        let reach = |lo: i32, hi: i32, x_lower: Real, dx: Real| {
            let cells = lo.unsigned_abs().max(hi.unsigned_abs()) as Real + 1.0;
            x_lower.abs() + cells * dx
        };
        reach(self.ghost.ilo, self.ghost.ihi, self.x_lower[0], self.dx[0])
            + reach(self.ghost.jlo, self.ghost.jhi, self.x_lower[1], self.dx[1])
            + self.center[0].abs()
            + self.center[1].abs()
    }
}

fn run(case: &Case) -> PatchData {
    let mut phi = PatchData::new(case.ghost, SENTINEL).expect("patch");
    let geometry = PatchGeometry::new(case.x_lower, case.dx).expect("geometry");
    let circle = Circle::new(case.center, case.radius).expect("circle");
    init_circle(&mut phi, case.fill, &geometry, &circle).expect("init");
    phi
}

proptest! {
    #[test]
    fn fill_values_match_distance_formula(case in case_strategy()) {
        let phi = run(&case);
        for (i, j) in case.fill.cells() {
            let x = case.x_lower[0] + (i as Real + 0.5) * case.dx[0];
            let y = case.x_lower[1] + (j as Real + 0.5) * case.dx[1];
            let want = (x - case.center[0]).hypot(y - case.center[1]) - case.radius;
            let got = phi.get(i, j).expect("fill cell in ghost box");
            let t = tol(want.abs() + case.radius);
            prop_assert!((got - want).abs() < t, "({}, {}): {} vs {}", i, j, got, want);

            if want < -t {
                prop_assert!(got < 0.0);
            } else if want > t {
                prop_assert!(got > 0.0);
            }
        }
    }

    #[test]
    fn cells_outside_fill_box_are_unmodified(case in case_strategy()) {
        let phi = run(&case);
        for (i, j) in case.ghost.cells() {
            if !case.fill.contains(i, j) {
                prop_assert_eq!(phi.get(i, j), Some(SENTINEL));
            }
        }
    }

    #[test]
    fn joint_translation_leaves_field_unchanged(
        case in case_strategy(),
        shift in (-10.0..10.0 as Real, -10.0..10.0 as Real),
    ) {
        let offset = Vector2::new(shift.0, shift.1);
        let base = run(&case);

        let mut shifted = PatchData::new(case.ghost, SENTINEL).expect("patch");
        let geometry = PatchGeometry::new(case.x_lower, case.dx)
            .expect("geometry")
            .translated(offset);
        let circle = Circle::new(case.center, case.radius)
            .expect("circle")
            .translated(offset);
        init_circle(&mut shifted, case.fill, &geometry, &circle).expect("init");

        let scale = case.coordinate_scale() + shift.0.abs() + shift.1.abs();
        for (a, b) in base.as_slice().iter().zip(shifted.as_slice()) {
            prop_assert!((a - b).abs() < tol(a.abs() + scale), "{} vs {}", a, b);
        }
    }
}

#[test]
fn point_on_circle_is_zero() {
    // cell (2, 0) is centred at (2.5, 0.5); circle through that point
    let ghost = IndexBox2::new(0, 4, 0, 4);
    let mut phi = PatchData::new(ghost, SENTINEL).expect("patch");
    let geometry = PatchGeometry::new([0.0, 0.0], [1.0, 1.0]).expect("geometry");
    let circle = Circle::new([0.5, 0.5], 2.0).expect("circle");
    init_circle(&mut phi, ghost, &geometry, &circle).expect("init");

    assert!(phi.get(2, 0).expect("cell").abs() < tol(2.0));
    assert!(phi.get(0, 0).expect("cell") < 0.0);
    assert!(phi.get(4, 4).expect("cell") > 0.0);
}
