//! Access policy predicates
//!
//! Pure functions mapping (role, ownership, borrower identity) to permitted
//! actions. Identity is passed as `Option<Uuid>`; an absent identity always
//! yields false.

use uuid::Uuid;

use crate::models::enums::Role;

/// Catalog management (create/edit/delete books) is reserved to staff.
pub fn can_manage_books(role: Role) -> bool {
    matches!(role, Role::Librarian | Role::Admin)
}

/// Only the owner may edit or delete an event.
pub fn can_manage_event(owner_id: Uuid, current_user: Option<Uuid>) -> bool {
    current_user.map(|u| u == owner_id).unwrap_or(false)
}

/// A borrow may be closed by the borrower themselves or by staff.
pub fn can_act_on_borrow(borrowed_by: Uuid, current_user: Option<Uuid>, role: Role) -> bool {
    match current_user {
        Some(user) => user == borrowed_by || can_manage_books(role),
        None => false,
    }
}

/// Inviting follows event ownership.
pub fn can_invite(owner_id: Uuid, current_user: Option<Uuid>) -> bool {
    can_manage_event(owner_id, current_user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_manage_books() {
        assert!(!can_manage_books(Role::Member));
        assert!(can_manage_books(Role::Librarian));
        assert!(can_manage_books(Role::Admin));
    }

    #[test]
    fn only_owner_manages_event() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(can_manage_event(owner, Some(owner)));
        assert!(!can_manage_event(owner, Some(other)));
        assert!(can_invite(owner, Some(owner)));
        assert!(!can_invite(owner, Some(other)));
    }

    #[test]
    fn absent_identity_fails_closed() {
        let owner = Uuid::new_v4();
        assert!(!can_manage_event(owner, None));
        assert!(!can_invite(owner, None));
        assert!(!can_act_on_borrow(owner, None, Role::Member));
        assert!(!can_act_on_borrow(owner, None, Role::Admin));
    }

    #[test]
    fn borrower_or_staff_act_on_borrow() {
        let borrower = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(can_act_on_borrow(borrower, Some(borrower), Role::Member));
        assert!(!can_act_on_borrow(borrower, Some(other), Role::Member));
        assert!(can_act_on_borrow(borrower, Some(other), Role::Librarian));
        assert!(can_act_on_borrow(borrower, Some(other), Role::Admin));
    }
}
