//! Superposition Engine
//!
//! Combines independent single-load responses into one [`ResultSet`] by
//! elementwise addition. Valid because every formula set in this crate is
//! linear elastic: the response to a sum of loads is the sum of the responses.
//!
//! A train is reduced to one point load per axle that is on the beam, then
//! folded. Axle order does not matter and an empty train gives a zero result.

use tracing::trace;

use super::single_load::solve_single;
use crate::beam::BeamModel;
use crate::errors::CalcResult;
use crate::loads::{SingleLoad, TrainLoad};
use crate::results::{ResultSet, StationGrid};

/// Fold the responses of `loads` into one result, starting from zero.
pub fn superpose<I>(model: &BeamModel, grid: &StationGrid, loads: I) -> CalcResult<ResultSet>
where
    I: IntoIterator<Item = SingleLoad>,
{
    loads
        .into_iter()
        .try_fold(ResultSet::zeros(grid, &model.support_positions()), |acc, load| {
            let response = solve_single(model, &load, grid)?;
            acc.superpose(&response)
        })
}

/// Solve a multi-axle train load.
pub fn solve_train(model: &BeamModel, train: &TrainLoad, grid: &StationGrid) -> CalcResult<ResultSet> {
    train.validate()?;

    let on_beam = train.axle_loads(model.length_m);
    let skipped = train.axles.len() - on_beam.len();
    if skipped > 0 {
        trace!(
            skipped,
            position = train.position,
            "axles off the beam contribute nothing"
        );
    }

    superpose(model, grid, on_beam.into_iter().map(SingleLoad::Point))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::beam::{BeamConfig, SupportCondition};
    use crate::loads::Axle;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn axle_order_is_irrelevant(
            axles in prop::collection::vec((0.0_f64..200.0, 0.0_f64..8.0), 0..5),
            position in 0.0_f64..=1.0,
            fixed in any::<bool>(),
        ) {
            let support = if fixed { SupportCondition::FixedFixed } else { SupportCondition::SimplySupported };
            let model = BeamConfig::new(12.0, support, 200.0, 80_000.0).model().unwrap();
            let grid = StationGrid::new(model.length_m, 60).unwrap();

            let forward = TrainLoad::new(
                axles.iter().map(|&(m, o)| Axle::new(m, o)).collect(),
                position,
            );
            let mut reversed = forward.clone();
            reversed.axles.reverse();

            let a = solve_train(&model, &forward, &grid).unwrap();
            let b = solve_train(&model, &reversed, &grid).unwrap();
            let scale = forward.gross_load_kn().max(1.0) * 12.0;
            for (x, y) in a.bending_moment.iter().zip(&b.bending_moment) {
                prop_assert!((x - y).abs() <= 1e-9 * scale);
            }
            prop_assert!((a.total_reaction_kn() - b.total_reaction_kn()).abs() <= 1e-9 * scale);
        }

        #[test]
        fn train_equals_sum_of_axle_solves(
            m1 in 0.0_f64..150.0,
            m2 in 0.0_f64..150.0,
            spacing in 0.5_f64..4.0,
            position in 0.0_f64..0.5,
        ) {
            let model = BeamConfig::default().model().unwrap();
            let grid = StationGrid::new(model.length_m, 100).unwrap();
            let train = TrainLoad::new(vec![Axle::new(m1, 0.0), Axle::new(m2, spacing)], position);

            let combined = solve_train(&model, &train, &grid).unwrap();
            let separate: Vec<ResultSet> = train
                .axle_loads(model.length_m)
                .into_iter()
                .map(|p| solve_single(&model, &SingleLoad::Point(p), &grid).unwrap())
                .collect();

            for i in 0..combined.len() {
                let expected: f64 = separate.iter().map(|r| r.bending_moment[i]).sum();
                prop_assert!((combined.bending_moment[i] - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }
}
