//! Method catalogues.
//!
//! Each function appends one family of methods to a [`MethodTable`]. A
//! descriptor composes the families that apply to it; the requirements
//! attached here decide which of them survive for a given element and key.

use stencil_foundation::{Capability, Operation, Result, Visibility};

use crate::method::{Method, MethodTable, Operand, Requirement, Role, Switch};

use crate::method::Operand::{ConstRef, ConstTarget, ConstValue, Int, Node, Size, Target, Value, Void};

fn copyable(role: Role) -> Requirement {
    Requirement::Capable(role, Capability::Copyable)
}

fn comparable(role: Role) -> Requirement {
    Requirement::Capable(role, Capability::Comparable)
}

fn set_operations() -> Requirement {
    Requirement::Enabled(Switch::SetOperations)
}

/// `create`, `destroy`, `copy`, `equal`, `compare` and `hash_code`, each live
/// exactly when the owner has the matching capability.
///
/// # Errors
/// Returns `DuplicateOperation` if any of them is already defined.
pub fn lifecycle(table: &mut MethodTable) -> Result<()> {
    table.define(
        Method::new(Operation::Create, Void)
            .param("target", Target)
            .requires(Requirement::owner(Capability::DefaultConstructible)),
    )?;
    table.define(
        Method::new(Operation::Destroy, Void)
            .param("target", Target)
            .requires(Requirement::owner(Capability::Destructible)),
    )?;
    table.define(
        Method::new(Operation::Copy, Void)
            .param("target", Target)
            .param("source", ConstTarget)
            .requires(Requirement::owner(Capability::Copyable)),
    )?;
    table.define(
        Method::new(Operation::Equal, Int)
            .param("left", ConstTarget)
            .param("right", ConstTarget)
            .requires(Requirement::owner(Capability::Comparable)),
    )?;
    table.define(
        Method::new(Operation::Compare, Int)
            .param("left", ConstTarget)
            .param("right", ConstTarget)
            .requires(Requirement::owner(Capability::Orderable)),
    )?;
    table.define(
        Method::new(Operation::HashCode, Size)
            .param("target", ConstTarget)
            .requires(Requirement::owner(Capability::Hashable)),
    )
}

/// Queries every collection answers.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn collection(table: &mut MethodTable) -> Result<()> {
    table.define(
        Method::new(Operation::Empty, Int)
            .param("target", ConstTarget)
            .with_inline(true),
    )?;
    table.define(
        Method::new(Operation::Size, Size)
            .param("target", ConstTarget)
            .with_inline(true),
    )?;
    table.define(Method::new(Operation::Purge, Void).param("target", Target))?;
    table.define(
        Method::new(Operation::Contains, Int)
            .param("target", ConstTarget)
            .param("value", ConstValue(Role::Element))
            .requires(comparable(Role::Element)),
    )?;
    table.define(
        Method::new(Operation::FindFirst, ConstRef(Role::Element))
            .param("target", ConstTarget)
            .param("value", ConstValue(Role::Element))
            .requires(comparable(Role::Element)),
    )
}

/// Insertion, removal and set algebra over a set's elements.
///
/// The algebra itself is gated by the set-operations switch; the
/// constructing variants additionally need a default-constructible owner.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn set(table: &mut MethodTable) -> Result<()> {
    let insert = copyable(Role::Element).and(comparable(Role::Element));
    for op in [Operation::Put, Operation::Push] {
        table.define(
            Method::new(op, Int)
                .param("target", Target)
                .param("value", ConstValue(Role::Element))
                .requires(insert.clone()),
        )?;
    }
    table.define(
        Method::new(Operation::Remove, Int)
            .param("target", Target)
            .param("value", ConstValue(Role::Element))
            .requires(comparable(Role::Element)),
    )?;
    table.define(
        Method::new(Operation::Subset, Int)
            .param("target", ConstTarget)
            .param("other", ConstTarget)
            .requires(comparable(Role::Element)),
    )?;
    table.define(
        Method::new(Operation::Disjoint, Int)
            .param("left", ConstTarget)
            .param("right", ConstTarget)
            .requires(set_operations().and(comparable(Role::Element))),
    )?;
    let in_place = [
        Operation::Join,
        Operation::Subtract,
        Operation::Intersect,
        Operation::Disjoin,
    ];
    let creating = [
        Operation::CreateJoin,
        Operation::CreateDifference,
        Operation::CreateIntersection,
        Operation::CreateDisjunction,
    ];
    for (op, create) in in_place.into_iter().zip(creating) {
        table.define(
            Method::new(op, Void)
                .param("target", Target)
                .param("source", ConstTarget)
                .requires(set_operations().and(insert.clone())),
        )?;
        table.define(
            Method::new(create, Void)
                .param("target", Target)
                .param("left", ConstTarget)
                .param("right", ConstTarget)
                .requires(
                    set_operations()
                        .and(Requirement::owner(Capability::DefaultConstructible))
                        .and(insert.clone()),
                ),
        )?;
    }
    Ok(())
}

/// Keyed access for maps.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn association(table: &mut MethodTable) -> Result<()> {
    table.define(
        Method::new(Operation::Check, Int)
            .param("target", ConstTarget)
            .param("key", ConstValue(Role::Key)),
    )?;
    table.define(
        Method::new(Operation::View, ConstRef(Role::Element))
            .param("target", ConstTarget)
            .param("key", ConstValue(Role::Key)),
    )?;
    table.define(
        Method::new(Operation::Get, Value(Role::Element))
            .param("target", ConstTarget)
            .param("key", ConstValue(Role::Key))
            .requires(copyable(Role::Element))
            .with_inline(true),
    )?;
    for op in [Operation::Put, Operation::Set] {
        table.define(
            Method::new(op, Int)
                .param("target", Target)
                .param("key", ConstValue(Role::Key))
                .param("value", ConstValue(Role::Element))
                .requires(copyable(Role::Key).and(copyable(Role::Element))),
        )?;
    }
    table.define(
        Method::new(Operation::Remove, Int)
            .param("target", Target)
            .param("key", ConstValue(Role::Key)),
    )?;
    table.define(
        Method::new(Operation::ContainsKey, Int)
            .param("target", ConstTarget)
            .param("key", ConstValue(Role::Key))
            .requires(comparable(Role::Key)),
    )?;
    table.define(
        Method::new(Operation::LookupKey, ConstRef(Role::Key))
            .param("target", ConstTarget)
            .param("key", ConstValue(Role::Key))
            .requires(comparable(Role::Key)),
    )
}

/// Indexed access, sizing and sorting for vectors.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn vector(table: &mut MethodTable) -> Result<()> {
    table.define(
        Method::new(Operation::CheckPosition, Int)
            .param("target", ConstTarget)
            .param("position", Size)
            .with_inline(true),
    )?;
    table.define(
        Method::new(Operation::CreateSize, Void)
            .param("target", Target)
            .param("size", Size)
            .requires(Requirement::owner(Capability::CustomConstructible)),
    )?;
    table.define(
        Method::new(Operation::CreateSet, Void)
            .param("target", Target)
            .param("size", Size)
            .param("value", ConstValue(Role::Element))
            .requires(copyable(Role::Element)),
    )?;
    table.define(
        Method::new(Operation::View, ConstRef(Role::Element))
            .param("target", ConstTarget)
            .param("position", Size)
            .with_inline(true),
    )?;
    table.define(
        Method::new(Operation::Get, Value(Role::Element))
            .param("target", ConstTarget)
            .param("position", Size)
            .requires(copyable(Role::Element)),
    )?;
    table.define(
        Method::new(Operation::Set, Void)
            .param("target", Target)
            .param("position", Size)
            .param("value", ConstValue(Role::Element))
            .requires(copyable(Role::Element)),
    )?;
    table.define(
        Method::new(Operation::Resize, Void)
            .param("target", Target)
            .param("new_size", Size)
            .requires(Requirement::element(Capability::DefaultConstructible)),
    )?;
    table.define(
        Method::new(Operation::Sort, Void)
            .param("target", Target)
            .param("direction", Int)
            .requires(Requirement::element(Capability::Orderable)),
    )
}

/// Front operations of singly linked lists.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn list(table: &mut MethodTable) -> Result<()> {
    table.define(Method::new(Operation::DropFront, Void).param("target", Target))?;
    table.define(
        Method::new(Operation::ViewFront, ConstRef(Role::Element)).param("target", ConstTarget),
    )?;
    table.define(Method::new(Operation::PullFront, Value(Role::Element)).param("target", Target))?;
    table.define(Method::new(Operation::PopFront, Void).param("target", Target))?;
    table.define(
        Method::new(Operation::TakeFront, Value(Role::Element))
            .param("target", ConstTarget)
            .requires(copyable(Role::Element)),
    )?;
    table.define(
        Method::new(Operation::PushFront, Void)
            .param("target", Target)
            .param("value", ConstValue(Role::Element))
            .requires(copyable(Role::Element)),
    )?;
    table.define(
        Method::new(Operation::Remove, Int)
            .param("target", Target)
            .param("value", ConstValue(Role::Element))
            .requires(comparable(Role::Element)),
    )
}

/// List operations plus their mirror images at the back.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn queue(table: &mut MethodTable) -> Result<()> {
    list(table)?;
    table.define(
        Method::new(Operation::ViewBack, ConstRef(Role::Element)).param("target", ConstTarget),
    )?;
    table.define(Method::new(Operation::PullBack, Value(Role::Element)).param("target", Target))?;
    table.define(Method::new(Operation::PopBack, Void).param("target", Target))?;
    table.define(
        Method::new(Operation::TakeBack, Value(Role::Element))
            .param("target", ConstTarget)
            .requires(copyable(Role::Element)),
    )?;
    table.define(
        Method::new(Operation::PushBack, Void)
            .param("target", Target)
            .param("value", ConstValue(Role::Element))
            .requires(copyable(Role::Element)),
    )
}

/// Sizing and probing helpers of open-addressing tables.
///
/// `lookup` is the role probed for: the element of a set, the key of a map.
/// The intrusive variant adds the sentinel marking helpers.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn hash(table: &mut MethodTable, lookup: Role, intrusive: bool) -> Result<()> {
    table.define(
        Method::new(Operation::CreateCapacity, Void)
            .param("target", Target)
            .param("capacity", Size)
            .requires(Requirement::owner(Capability::CustomConstructible)),
    )?;
    table.define(
        Method::new(Operation::Slot, Size)
            .param("target", ConstTarget)
            .param("value", ConstValue(lookup))
            .with_visibility(Visibility::Internal),
    )?;
    table.define(
        Method::new(Operation::NextSlot, Size)
            .param("target", ConstTarget)
            .param("slot", Size)
            .with_visibility(Visibility::Internal)
            .with_inline(true),
    )?;
    table.define(
        Method::new(Operation::Expand, Void)
            .param("target", Target)
            .param("force", Int),
    )?;
    table.define(
        Method::new(Operation::PutForce, Void)
            .param("target", Target)
            .param("value", ConstValue(lookup))
            .with_visibility(Visibility::Internal),
    )?;
    if intrusive {
        table.define(
            Method::new(Operation::Mark, Void)
                .param("slot", Node)
                .param("state", Int)
                .with_visibility(Visibility::Internal),
        )?;
        table.define(
            Method::new(Operation::Marked, Int)
                .param("slot", Node)
                .with_visibility(Visibility::Internal),
        )?;
        table.define(
            Method::new(Operation::Adopt, Void)
                .param("target", Target)
                .param("value", ConstValue(lookup))
                .with_visibility(Visibility::Internal),
        )?;
    }
    Ok(())
}

/// Statistics helpers, emitted only with auxiliaries switched on.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn diagnostics(table: &mut MethodTable, lookup: Role) -> Result<()> {
    let enabled = Requirement::Enabled(Switch::Auxiliaries);
    table.define(
        Method::new(Operation::CountProbes, Size)
            .param("target", ConstTarget)
            .param("value", ConstValue(lookup))
            .requires(enabled.clone())
            .with_visibility(Visibility::Internal),
    )?;
    table.define(
        Method::new(Operation::PrintStats, Void)
            .param("target", ConstTarget)
            .param("stream", Operand::Raw("FILE*".to_string()))
            .requires(enabled),
    )
}

/// Rotation, fixup and traversal helpers of red-black trees.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn red_black(table: &mut MethodTable, lookup: Role) -> Result<()> {
    table.define(
        Method::new(Operation::Lookup, Node)
            .param("target", ConstTarget)
            .param("value", ConstValue(lookup)),
    )?;
    for op in [Operation::RotateLeft, Operation::RotateRight, Operation::InsertFixup] {
        table.define(Method::new(op, Void).param("target", Target).param("node", Node))?;
    }
    table.define(
        Method::new(Operation::DeleteFixup, Void)
            .param("target", Target)
            .param("node", Node)
            .param("parent", Node),
    )?;
    for op in [Operation::LowestNode, Operation::HighestNode] {
        table.define(
            Method::new(op, Node)
                .param("target", ConstTarget)
                .with_visibility(Visibility::Internal),
        )?;
    }
    for op in [Operation::NextNode, Operation::PrevNode] {
        table.define(
            Method::new(op, Node)
                .param("node", Node)
                .with_visibility(Visibility::Internal),
        )?;
    }
    table.define(Method::new(Operation::Dispose, Void).param("node", Node))
}

/// Split, merge and recursive update helpers of treaps.
///
/// # Errors
/// Returns `DuplicateOperation` on redefinition.
pub fn treap(table: &mut MethodTable, lookup: Role) -> Result<()> {
    let link = || Operand::Raw("void**".to_string());
    table.define(
        Method::new(Operation::Merge, Void)
            .param("node", link())
            .param("left", Node)
            .param("right", Node)
            .with_visibility(Visibility::Internal),
    )?;
    table.define(
        Method::new(Operation::Split, Void)
            .param("node", Node)
            .param("value", ConstValue(lookup))
            .param("left", link())
            .param("right", link())
            .with_visibility(Visibility::Internal),
    )?;
    table.define(
        Method::new(Operation::Lookup, Node)
            .param("node", Node)
            .param("value", ConstValue(lookup)),
    )?;
    table.define(
        Method::new(Operation::Insert, Size)
            .param("target", Target)
            .param("node", link())
            .param("new_node", Node)
            .param("depth", Size)
            .with_visibility(Visibility::Internal),
    )?;
    table.define(
        Method::new(Operation::Erase, Int)
            .param("node", link())
            .param("value", ConstValue(lookup))
            .with_visibility(Visibility::Internal),
    )?;
    table.define(
        Method::new(Operation::Dispose, Void)
            .param("node", Node)
            .with_visibility(Visibility::Internal),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Subject;
    use stencil_foundation::Capabilities;

    fn scalar(set_operations: bool) -> Subject {
        Subject {
            owner: Capabilities::SCALAR,
            element: Capabilities::SCALAR,
            key: Capabilities::SCALAR,
            set_operations,
            auxiliaries: false,
        }
    }

    #[test]
    fn lifecycle_follows_owner_capabilities() {
        let mut table = MethodTable::new("T");
        lifecycle(&mut table).unwrap();
        let subject = Subject {
            owner: Capabilities::COPYABLE | Capabilities::COMPARABLE,
            ..Subject::default()
        };
        let live: Vec<_> = table.live(&subject).map(Method::operation).collect();
        assert_eq!(live, vec![Operation::Copy, Operation::Equal]);
    }

    #[test]
    fn set_algebra_follows_switch() {
        let mut table = MethodTable::new("IntSet");
        set(&mut table).unwrap();
        assert!(table.is_live(Operation::CreateJoin, &scalar(true)));
        assert!(!table.is_live(Operation::CreateJoin, &scalar(false)));
        assert!(table.is_live(Operation::Put, &scalar(false)));
        assert!(table.is_live(Operation::Subset, &scalar(false)));
    }

    #[test]
    fn queue_extends_list() {
        let mut table = MethodTable::new("IntQueue");
        queue(&mut table).unwrap();
        assert!(table.get(Operation::PushFront).is_some());
        assert!(table.get(Operation::PullBack).is_some());
    }

    #[test]
    fn families_collide_on_shared_operations() {
        let mut table = MethodTable::new("IntMap");
        association(&mut table).unwrap();
        assert!(set(&mut table).is_err());
    }

    #[test]
    fn diagnostics_need_auxiliaries() {
        let mut table = MethodTable::new("IntSet");
        diagnostics(&mut table, Role::Element).unwrap();
        let mut subject = scalar(true);
        assert_eq!(table.live(&subject).count(), 0);
        subject.auxiliaries = true;
        assert_eq!(table.live(&subject).count(), 2);
    }

    #[test]
    fn red_black_and_treap_helpers_are_hidden() {
        let mut table = MethodTable::new("IntTree");
        red_black(&mut table, Role::Element).unwrap();
        assert!(table.iter().all(|m| !m.visibility().is_public()));
        let mut table = MethodTable::new("IntTreap");
        treap(&mut table, Role::Element).unwrap();
        assert!(table.iter().all(|m| !m.visibility().is_public()));
    }
}
