//! Sparse sequence navigator
//!
//! Siblings are scanned by `order`, not by list position: a page next to the
//! current one frequently has no resource of the requested kind. Siblings
//! without an order are never selected and never used as an anchor.
//!
//! Orders are expected to be unique and increasing with position. When they
//! are not, the result is still deterministic: the current item is the first
//! sibling with the requested id, siblings sharing its order are neither
//! previous nor next, previous is the candidate with the greatest lower order,
//! next the one with the smallest higher order, and equal candidate orders
//! resolve to the first sibling by position.

use super::NavigationError;

/// An element of an ordered sibling collection
#[derive(Debug)]
pub struct SiblingItem<'a, R> {
    pub id: &'a str,
    /// Position within the parent; `None` or `0` excludes the item
    pub order: Option<u32>,
    /// Resource attached to this item, if any
    pub resource: Option<&'a R>,
}

impl<'a, R> SiblingItem<'a, R> {
    pub fn new(id: &'a str, order: Option<u32>, resource: Option<&'a R>) -> Self {
        Self {
            id,
            order,
            resource,
        }
    }

    fn navigable_order(&self) -> Option<u32> {
        self.order.filter(|order| *order > 0)
    }

    fn navigable_resource(&self) -> Option<&'a R> {
        self.navigable_order().and(self.resource)
    }
}

/// Boundary and adjacent resources relative to one sibling
#[derive(Debug, PartialEq)]
pub struct Navigation<'a, R> {
    pub first: Option<&'a R>,
    pub last: Option<&'a R>,
    pub previous: Option<&'a R>,
    pub next: Option<&'a R>,
}

/// Resolve first/last/previous/next resources for `current_id`
pub fn navigate<'a, R>(
    siblings: &[SiblingItem<'a, R>],
    current_id: &str,
) -> Result<Navigation<'a, R>, NavigationError> {
    let current = siblings
        .iter()
        .find(|sibling| sibling.id == current_id)
        .ok_or_else(|| NavigationError::UnknownItem(current_id.to_string()))?;

    let first = siblings.iter().find_map(SiblingItem::navigable_resource);
    let last = siblings.iter().rev().find_map(SiblingItem::navigable_resource);

    let (previous, next) = match current.navigable_order() {
        Some(anchor) => (
            closest(siblings, |order| order < anchor, |best, order| best >= order),
            closest(siblings, |order| order > anchor, |best, order| best <= order),
        ),
        None => (None, None),
    };

    Ok(Navigation {
        first,
        last,
        previous,
        next,
    })
}

/// Resource of the best-placed sibling whose order passes `accept`
///
/// `keep(best, order)` tells whether the current best stays ahead of a later
/// candidate, so equal orders resolve to the first sibling by position.
fn closest<'a, R>(
    siblings: &[SiblingItem<'a, R>],
    accept: impl Fn(u32) -> bool,
    keep: impl Fn(u32, u32) -> bool,
) -> Option<&'a R> {
    siblings
        .iter()
        .filter_map(|s| Some((s.navigable_order()?, s.navigable_resource()?)))
        .filter(|(order, _)| accept(*order))
        .fold(None, |best, (order, resource)| match best {
            Some((best_order, _)) if keep(best_order, order) => best,
            _ => Some((order, resource)),
        })
        .map(|(_, resource)| resource)
}
