use crate::basis::{BasisDescription, FunctionSpaceBasis, LeafNode, LocalNode};
use crate::container_descriptors::{flat_vector, ContainerDescriptor};
use crate::element::LagrangeFiniteElement;
use crate::error::BasisError;
use crate::grid::GridView;
use crate::multi_index::MultiIndex;
use log::debug;

/// A continuous scalar Lagrange basis on a triangle grid.
///
/// Order 1 associates one degree of freedom with each vertex. Order 2 additionally associates
/// one degree of freedom with each edge. Vertex degrees of freedom are numbered by the
/// vertex index, edge degrees of freedom follow after all vertices and are numbered by the
/// edge index.
#[derive(Debug, Clone)]
pub struct LagrangeBasis<'a, G> {
    grid_view: &'a G,
    finite_element: LagrangeFiniteElement,
    dimension: usize,
}

impl<'a, G> LagrangeBasis<'a, G>
where
    G: GridView,
{
    /// Constructs a Lagrange basis of the given order on a two-dimensional triangle grid.
    pub fn new(grid_view: &'a G, order: usize) -> Result<Self, BasisError> {
        let finite_element =
            LagrangeFiniteElement::from_order(order).ok_or(BasisError::UnsupportedLagrangeOrder {
                order,
                supported: LagrangeFiniteElement::SUPPORTED_ORDERS,
            })?;

        if grid_view.dimension() != 2 {
            return Err(BasisError::DimensionMismatch {
                expected: 2,
                actual: grid_view.dimension(),
            });
        }

        for element in grid_view.elements() {
            let num_vertices = grid_view.num_sub_entities(element.index(), 2);
            if num_vertices != 3 {
                return Err(BasisError::UnsupportedCell {
                    element_index: element.index(),
                    num_vertices,
                });
            }
        }

        let dimension = match finite_element {
            LagrangeFiniteElement::Linear => grid_view.size(2),
            LagrangeFiniteElement::Quadratic => grid_view.size(2) + grid_view.size(1),
        };

        debug!(
            "Constructed Lagrange basis of order {} with {} degrees of freedom.",
            order, dimension
        );

        Ok(Self {
            grid_view,
            finite_element,
            dimension,
        })
    }

    pub fn order(&self) -> usize {
        self.finite_element.order()
    }

    pub fn finite_element(&self) -> &LagrangeFiniteElement {
        &self.finite_element
    }

    /// The global index of the `j`-th shape function on the given element.
    pub fn global_index(&self, element: usize, j: usize) -> usize {
        debug_assert!(j < self.finite_element.size());
        if j < 3 {
            self.grid_view.sub_entity(element, 2, j)
        } else {
            // Shape function 3 + i belongs to face i of the triangle
            self.grid_view.size(2) + self.grid_view.sub_entity(element, 1, j - 3)
        }
    }
}

impl<'a, G> FunctionSpaceBasis for LagrangeBasis<'a, G>
where
    G: GridView,
{
    type GridView = G;

    const MULTI_INDEX_MAX_SIZE: usize = 1;

    fn grid_view(&self) -> &G {
        self.grid_view
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn size(&self, prefix: &[usize]) -> usize {
        if prefix.is_empty() {
            self.dimension
        } else {
            0
        }
    }

    fn max_node_size(&self) -> usize {
        self.finite_element.size()
    }

    fn container_descriptor(&self) -> ContainerDescriptor {
        flat_vector(self.dimension)
    }

    fn description(&self) -> BasisDescription {
        BasisDescription::lagrange(self.order())
    }

    fn create_node(&self) -> LocalNode {
        LocalNode::Leaf(LeafNode::new(self.finite_element))
    }

    fn bind_node(&self, node: &mut LocalNode, element: usize, offset: usize, stride: usize) {
        node.expect_leaf_mut().bind(element, offset, stride);
    }

    fn indices(&self, node: &LocalNode, indices: &mut [MultiIndex]) {
        let leaf = node.expect_leaf();
        for j in 0..leaf.size() {
            indices[leaf.local_index(j)].set_flat(self.global_index(leaf.element(), j));
        }
    }
}
