use crate::basis::{BlockedLexicographic, CompositeBasis, FlatInterleaved, LagrangeBasis, PowerBasis};
use crate::error::BasisError;
use crate::grid::GridView;

/// The quadratic velocity basis of a Taylor-Hood pair.
pub type TaylorHoodVelocityBasis<'a, G, const D: usize> = PowerBasis<FlatInterleaved, LagrangeBasis<'a, G>, D>;

/// The lowest order Taylor-Hood basis: `D` quadratic velocity components and a linear pressure.
///
/// Global indices are two-level. Index `(0, i * D + c)` is component `c` of the velocity at
/// quadratic node `i`, index `(1, j)` is the pressure at vertex `j`. Locally, the `6 * D`
/// velocity degrees of freedom come first with components interleaved, followed by the
/// three pressure degrees of freedom.
pub type TaylorHoodBasis<'a, G, const D: usize> =
    CompositeBasis<BlockedLexicographic, (TaylorHoodVelocityBasis<'a, G, D>, LagrangeBasis<'a, G>)>;

/// Constructs the Taylor-Hood basis on a grid of dimension `D`.
pub fn taylor_hood<'a, G, const D: usize>(grid_view: &'a G) -> Result<TaylorHoodBasis<'a, G, D>, BasisError>
where
    G: GridView,
{
    if grid_view.dimension() != D {
        return Err(BasisError::DimensionMismatch {
            expected: D,
            actual: grid_view.dimension(),
        });
    }

    let velocity = PowerBasis::new(LagrangeBasis::new(grid_view, 2)?);
    let pressure = LagrangeBasis::new(grid_view, 1)?;
    CompositeBasis::new((velocity, pressure))
}

impl<'a, G, const D: usize> TaylorHoodBasis<'a, G, D>
where
    G: GridView,
{
    pub fn velocity(&self) -> &TaylorHoodVelocityBasis<'a, G, D> {
        &self.children().0
    }

    pub fn pressure(&self) -> &LagrangeBasis<'a, G> {
        &self.children().1
    }
}
