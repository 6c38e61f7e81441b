use log::debug;
use log::warn;

use super::ConnectivityArgs;
use super::FloodfillMode;
use crate::basic_types::ModelError;
use crate::basic_types::ModelResult;
use crate::containers::KeyedVec;
use crate::encoders::and;
use crate::encoders::and_tagged;
use crate::encoders::any_true;
use crate::encoders::implies;
use crate::encoders::or;
use crate::encoders::or_tagged;
use crate::grid::Adjacency;
use crate::grid::CellId;
use crate::grid::EdgeAdjacency;
use crate::grid::VariableGrid;
use crate::model::Model;
use crate::variables::BoolVar;
use crate::variables::VariableTag;

/// Enforces that the cells whose `membership` is true form one non-empty region which is
/// connected through `adjacency`.
///
/// The encoding unrolls a floodfill of `args.max_size` layers. Layer 0 holds exactly one cell:
/// the seed if one is given, otherwise the first member cell in row-major order. A cell is
/// reached in layer `k` only when a neighbour was reached in layer `k - 1`, and a cell is a
/// member exactly when some layer reaches it.
///
/// Cells which the adjacency cannot connect to the seed within the available layers are forced
/// out of the region. Regions larger than `args.max_size` cells may not be found; a bound below
/// the number of cells is accepted but logged.
///
/// # Errors
/// - [`ModelError::ZeroLayerBound`] if `args.max_size` is zero.
/// - [`ModelError::MissingCell`] if `membership` and `adjacency` do not cover the same cells.
/// - [`ModelError::SeedOutsideGrid`] if the seed has no membership variable.
pub fn connected(
    model: &mut Model,
    membership: &VariableGrid<BoolVar>,
    adjacency: &Adjacency,
    args: ConnectivityArgs,
) -> ModelResult<()> {
    floodfill(model, membership, Links::Fixed(adjacency), args)
}

/// Like [`connected`], but a neighbour only passes the floodfill on when the edge variable
/// between the two cells is true.
pub fn connected_by_edges(
    model: &mut Model,
    membership: &VariableGrid<BoolVar>,
    edges: &EdgeAdjacency,
    args: ConnectivityArgs,
) -> ModelResult<()> {
    floodfill(model, membership, Links::Variable(edges), args)
}

#[derive(Clone, Copy, Debug)]
enum Links<'a> {
    Fixed(&'a Adjacency),
    Variable(&'a EdgeAdjacency),
}

impl Links<'_> {
    fn adjacency(&self) -> &Adjacency {
        match self {
            Links::Fixed(adjacency) => adjacency,
            Links::Variable(edges) => edges.adjacency(),
        }
    }

    /// Whether `from` reached in the previous layer passes the floodfill on to `to`.
    fn passes(&self, model: &mut Model, reached: BoolVar, from: CellId, to: CellId) -> BoolVar {
        match self.edge(from, to) {
            Some(edge) => and(model, &[reached, edge]),
            None => reached,
        }
    }

    fn edge(&self, from: CellId, to: CellId) -> Option<BoolVar> {
        match self {
            Links::Fixed(_) => None,
            Links::Variable(edges) => edges.edge(from, to),
        }
    }
}

fn floodfill(
    model: &mut Model,
    membership: &VariableGrid<BoolVar>,
    links: Links<'_>,
    args: ConnectivityArgs,
) -> ModelResult<()> {
    let adjacency = links.adjacency();
    let members = validate(membership, adjacency, args)?;
    let seed = args
        .seed
        .map(|cell| adjacency.id(cell).ok_or(ModelError::SeedOutsideGrid(cell)))
        .transpose()?;

    if args.max_size < adjacency.len() {
        warn!(
            "connectivity bound {} is below the {} cells of layer {}",
            args.max_size,
            adjacency.len(),
            membership.layer()
        );
    }

    // Beyond one layer per cell the floodfill cannot grow.
    let layers = args.max_size.min(adjacency.len());
    debug!(
        "floodfill over {} cells with {layers} layers ({:?})",
        adjacency.len(),
        args.mode
    );

    let members_list = members.iter().copied().collect::<Vec<_>>();
    any_true(model, &members_list);

    let distances = seed.map(|seed| adjacency.distances_from(seed));
    let reachable = |id: CellId, depth: usize| {
        distances.as_ref().map_or(true, |distances| {
            distances[id].is_some_and(|distance| distance as usize <= depth)
        })
    };

    for id in adjacency.ids() {
        if !reachable(id, layers - 1) {
            any_true(model, &[!members[id]]);
        }
    }

    let mut volume = first_layer(model, adjacency, &members, seed);
    let mut seen = volume.clone();

    for depth in 1..layers {
        let next = adjacency
            .ids()
            .map(|id| {
                if !reachable(id, depth) {
                    return model.false_bool();
                }

                let incoming = adjacency
                    .neighbours(id)
                    .filter(|&other| reachable(other, depth - 1))
                    .map(|other| links.passes(model, volume[other], other, id))
                    .collect::<Vec<_>>();
                let reach = or(model, &incoming);

                let tag = VariableTag::Floodfill {
                    cell: adjacency.cell(id),
                    depth: depth as u32,
                };
                match args.mode {
                    FloodfillMode::Monotone => {
                        let step = and(model, &[members[id], reach]);
                        or_tagged(model, &[volume[id], step], tag)
                    }
                    FloodfillMode::Exact => {
                        and_tagged(model, &[members[id], !seen[id], reach], tag)
                    }
                }
            })
            .collect::<KeyedVec<CellId, BoolVar>>();

        if args.mode == FloodfillMode::Exact {
            for id in adjacency.ids() {
                seen[id] = or(model, &[seen[id], next[id]]);
            }
        }
        volume = next;
    }

    let reached = match args.mode {
        FloodfillMode::Monotone => volume,
        FloodfillMode::Exact => seen,
    };
    for id in adjacency.ids() {
        implies(model, members[id], reached[id]);
        implies(model, reached[id], members[id]);
    }

    Ok(())
}

/// The membership variable of every cell, keyed like `adjacency`.
fn validate(
    membership: &VariableGrid<BoolVar>,
    adjacency: &Adjacency,
    args: ConnectivityArgs,
) -> ModelResult<KeyedVec<CellId, BoolVar>> {
    if args.max_size == 0 {
        return Err(ModelError::ZeroLayerBound);
    }

    if let Some(cell) = membership.cells().find(|&cell| adjacency.id(cell).is_none()) {
        return Err(ModelError::MissingCell(cell));
    }

    if let Some(seed) = args.seed {
        if !membership.contains(seed) {
            return Err(ModelError::SeedOutsideGrid(seed));
        }
    }

    adjacency.cells().map(|cell| membership.var(cell)).collect()
}

/// Layer 0: the seed, or the first member cell in row-major order.
fn first_layer(
    model: &mut Model,
    adjacency: &Adjacency,
    members: &KeyedVec<CellId, BoolVar>,
    seed: Option<CellId>,
) -> KeyedVec<CellId, BoolVar> {
    match seed {
        Some(seed) => {
            any_true(model, &[members[seed]]);
            adjacency
                .ids()
                .map(|id| model.bool_constant(id == seed))
                .collect()
        }
        None => {
            let mut earlier = model.false_bool();
            adjacency
                .ids()
                .map(|id| {
                    let tag = VariableTag::Floodfill {
                        cell: adjacency.cell(id),
                        depth: 0,
                    };
                    let first = and_tagged(model, &[members[id], !earlier], tag);
                    earlier = or(model, &[earlier, members[id]]);
                    first
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::rectangle;
    use crate::basic_types::Cell;
    use crate::grid::Layer;
    use crate::model::SolveOutcome;

    fn square(model: &mut Model, size: i32) -> (VariableGrid<BoolVar>, Adjacency) {
        let cells = rectangle(size, size).collect::<Vec<_>>();
        let membership = model
            .add_bool_layer(Layer::Shading, cells.iter().copied())
            .expect("fresh layer");
        (membership, Adjacency::orthogonal(cells))
    }

    #[test]
    fn zero_layers_are_rejected() {
        let mut model = Model::default();
        let (membership, adjacency) = square(&mut model, 2);

        let result = connected(&mut model, &membership, &adjacency, ConnectivityArgs::new(0));
        assert_eq!(result, Err(ModelError::ZeroLayerBound));
    }

    #[test]
    fn seed_must_be_a_member_cell() {
        let mut model = Model::default();
        let (membership, adjacency) = square(&mut model, 2);

        let args = ConnectivityArgs::new(4).with_seed(Cell::new(5, 5));
        let result = connected(&mut model, &membership, &adjacency, args);
        assert_eq!(result, Err(ModelError::SeedOutsideGrid(Cell::new(5, 5))));
    }

    #[test]
    fn membership_cells_must_be_adjacency_cells() {
        let mut model = Model::default();
        let (membership, _) = square(&mut model, 2);
        let adjacency = Adjacency::orthogonal([Cell::new(0, 0), Cell::new(0, 1)]);

        let result = connected(&mut model, &membership, &adjacency, ConnectivityArgs::new(4));
        assert_eq!(result, Err(ModelError::MissingCell(Cell::new(1, 0))));
    }

    #[test]
    fn corners_alone_are_not_connected() {
        for mode in [FloodfillMode::Monotone, FloodfillMode::Exact] {
            let mut model = Model::default();
            let (membership, adjacency) = square(&mut model, 3);
            for cell in membership.cells().collect::<Vec<_>>() {
                let var = membership.var(cell).expect("cell of the layer");
                let corner = cell.row != 1 && cell.col != 1;
                any_true(&mut model, &[if corner { var } else { !var }]);
            }

            let args = ConnectivityArgs::new(9).with_mode(mode);
            connected(&mut model, &membership, &adjacency, args).expect("valid arguments");

            assert!(matches!(model.solve(), SolveOutcome::NoSolution), "{mode:?}");
        }
    }

    #[test]
    fn cells_too_far_from_the_seed_are_excluded() {
        let mut model = Model::default();
        let (membership, adjacency) = square(&mut model, 3);
        let far = membership.var(Cell::new(2, 2)).expect("cell of the layer");

        let args = ConnectivityArgs::new(3).with_seed(Cell::new(0, 0));
        connected(&mut model, &membership, &adjacency, args).expect("valid arguments");
        any_true(&mut model, &[far]);

        assert!(matches!(model.solve(), SolveOutcome::NoSolution));
    }
}
