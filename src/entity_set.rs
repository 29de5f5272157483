use crate::grid::{Entities, Entity, GridView};

/// The set of all entities of a fixed codimension of a grid view.
///
/// The entity set does not own the grid view, and never modifies it.
#[derive(Debug)]
pub struct GridViewEntitySet<'a, G, const CODIM: usize> {
    grid_view: &'a G,
}

/// The elements (codimension zero entities) of a grid view.
pub type ElementSet<'a, G> = GridViewEntitySet<'a, G, 0>;

impl<'a, G, const CODIM: usize> Clone for GridViewEntitySet<'a, G, CODIM> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, G, const CODIM: usize> Copy for GridViewEntitySet<'a, G, CODIM> {}

impl<'a, G, const CODIM: usize> GridViewEntitySet<'a, G, CODIM>
where
    G: GridView,
{
    pub fn new(grid_view: &'a G) -> Self {
        Self { grid_view }
    }

    pub fn codim(&self) -> usize {
        CODIM
    }

    /// Returns `true` if the entity has the codimension of the set and is contained in the grid view.
    pub fn contains(&self, entity: &Entity) -> bool {
        entity.codim() == CODIM && self.grid_view.contains(entity)
    }

    /// The number of entities visited by [`GridViewEntitySet::iter`].
    pub fn size(&self) -> usize {
        self.grid_view.size(CODIM)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn iter(&self) -> Entities {
        self.grid_view.entities(CODIM)
    }

    pub fn grid_view(&self) -> &'a G {
        self.grid_view
    }
}

impl<'a, 'b, G, const CODIM: usize> IntoIterator for &'b GridViewEntitySet<'a, G, CODIM>
where
    G: GridView,
{
    type Item = Entity;
    type IntoIter = Entities;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, G, const CODIM: usize> IntoIterator for GridViewEntitySet<'a, G, CODIM>
where
    G: GridView,
{
    type Item = Entity;
    type IntoIter = Entities;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
