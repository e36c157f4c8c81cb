//! End-to-end scenarios for admission, pricing and removal.

use hierarchy_runtime::{Amount, Hierarchy, HierarchyError, PricingConfig, UserId, UserView};

fn id(s: &str) -> UserId {
    UserId::new(s)
}

fn admin() -> UserId {
    id("0x00000000000000000000000000000000000000a1")
}

fn deploy(capacity: usize) -> Hierarchy {
    Hierarchy::create(admin(), capacity).unwrap()
}

fn add(
    h: &mut Hierarchy,
    caller: &UserId,
    user: &str,
    can_add: bool,
    can_remove: bool,
) -> usize {
    let price = h.calculate_price();
    h.add_user(caller, id(user), can_add, can_remove, price).unwrap()
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[test]
fn returns_the_total_size() {
    let h = deploy(5);
    assert_eq!(h.total_size(), 5);
}

#[test]
fn creates_the_admin() {
    let h = deploy(5);
    assert_eq!(
        h.users(&admin()),
        UserView {
            parent: None,
            can_add: true,
            can_remove: true,
            is_member: true,
        }
    );
    assert_eq!(h.size(), 1);
}

#[test]
fn rejects_zero_capacity() {
    let err = Hierarchy::create(admin(), 0).unwrap_err();
    assert_eq!(err, HierarchyError::InvalidCapacity);
}

// ---------------------------------------------------------------------------
// First layer
// ---------------------------------------------------------------------------

#[test]
fn admin_adds_first_layer_with_every_permission_combination() {
    for (can_add, can_remove) in [(true, true), (true, false), (false, true), (false, false)] {
        let mut h = deploy(5);
        let occupancy = add(&mut h, &admin(), "u1", can_add, can_remove);

        assert_eq!(occupancy, 2);
        assert_eq!(h.size(), 2);
        assert_eq!(
            h.users(&id("u1")),
            UserView {
                parent: Some(admin()),
                can_add,
                can_remove,
                is_member: true,
            }
        );
        assert_eq!(h.get_user_children(&admin()), vec![id("u1")]);
    }
}

#[test]
fn outsider_cannot_add() {
    let mut h = deploy(5);
    let price = h.calculate_price();
    let err = h.add_user(&id("u1"), id("u1"), true, true, price).unwrap_err();
    assert_eq!(err.to_string(), "You don't exist in hierarchy");
}

// ---------------------------------------------------------------------------
// Second layer
// ---------------------------------------------------------------------------

#[test]
fn first_layer_user_adds_second_layer() {
    let mut h = deploy(5);
    add(&mut h, &admin(), "u1", true, true);
    add(&mut h, &id("u1"), "u2", true, true);

    let view = h.users(&id("u2"));
    assert_eq!(view.parent, Some(id("u1")));
    assert!(view.can_add && view.can_remove && view.is_member);
}

#[test]
fn cannot_grant_remove_without_holding_it() {
    let mut h = deploy(5);
    add(&mut h, &admin(), "u1", true, false);

    let price = h.calculate_price();
    let err = h.add_user(&id("u1"), id("u2"), true, true, price).unwrap_err();

    assert_eq!(
        err.to_string(),
        "You can't add users with permissions that you don't have"
    );
    assert_eq!(h.size(), 2);
}

#[test]
fn cannot_add_without_add_permission() {
    let mut h = deploy(5);
    add(&mut h, &admin(), "u1", false, false);

    let price = h.calculate_price();
    let err = h.add_user(&id("u1"), id("u2"), false, false, price).unwrap_err();
    assert_eq!(err.to_string(), "You don't have add permission");
}

#[test]
fn duplicate_user_is_rejected() {
    let mut h = deploy(5);
    add(&mut h, &admin(), "u1", true, true);

    let price = h.calculate_price();
    let err = h.add_user(&admin(), id("u1"), true, true, price).unwrap_err();
    assert_eq!(err.to_string(), "User exists");
}

// ---------------------------------------------------------------------------
// Capacity and payment
// ---------------------------------------------------------------------------

#[test]
fn capacity_is_enforced_exactly_at_the_limit() {
    let mut h = deploy(3);
    add(&mut h, &admin(), "u1", true, true);
    add(&mut h, &admin(), "u2", true, true);
    assert_eq!(h.size(), 3);

    let price = h.calculate_price();
    let err = h.add_user(&admin(), id("u3"), true, true, price).unwrap_err();
    assert_eq!(err.to_string(), "Hierarchy total size exceeded");

    // A removal frees the slot again
    h.remove_user(&admin(), &id("u2")).unwrap();
    add(&mut h, &admin(), "u3", true, true);
    assert_eq!(h.size(), 3);
}

#[test]
fn insufficient_payment_is_rejected() {
    let mut h = deploy(5);
    let price = h.calculate_price();

    let err = h
        .add_user(&admin(), id("u1"), true, true, price.saturating_sub(Amount::new(1)))
        .unwrap_err();

    assert_eq!(err.to_string(), "Price must be greater then sended");
    assert_eq!(h.size(), 1);
    assert!(!h.users(&id("u1")).is_member);
    assert!(h.get_user_children(&admin()).is_empty());
}

#[test]
fn flat_price_is_stable_across_admissions() {
    let mut h = deploy(5);
    let before = h.calculate_price();
    add(&mut h, &admin(), "u1", true, true);
    assert_eq!(h.calculate_price(), before);
}

#[test]
fn proportional_price_doubles_after_first_admission() {
    let mut h = Hierarchy::with_pricing(admin(), 5, PricingConfig::proportional(10)).unwrap();
    let first = h.calculate_price();
    add(&mut h, &admin(), "u1", true, true);
    assert_eq!(h.calculate_price(), first.saturating_mul(2));
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

#[test]
fn removing_internal_node_repromotes_children() {
    let mut h = deploy(8);
    add(&mut h, &admin(), "u1", true, true);
    add(&mut h, &id("u1"), "u2", true, true);
    add(&mut h, &id("u1"), "u3", true, true);
    add(&mut h, &id("u2"), "u4", true, true);
    add(&mut h, &id("u2"), "u5", true, true);

    h.remove_user(&admin(), &id("u1")).unwrap();

    assert_eq!(h.get_user_children(&admin()), vec![id("u2")]);
    assert_eq!(
        h.get_user_children(&id("u2")),
        vec![id("u4"), id("u5"), id("u3")]
    );
    assert_eq!(h.users(&id("u3")).parent, Some(id("u2")));
    assert_eq!(h.users(&id("u2")).parent, Some(admin()));
    assert!(!h.users(&id("u1")).is_member);
    assert_eq!(h.size(), 5);
    assert_eq!(h.check_invariants(), Ok(()));
}

#[test]
fn add_then_remove_restores_state() {
    let mut h = deploy(5);
    add(&mut h, &admin(), "u1", true, true);
    add(&mut h, &admin(), "u2", true, true);
    let children_before = h.get_user_children(&admin());
    let size_before = h.size();

    add(&mut h, &admin(), "u3", false, false);
    h.remove_user(&id("u1"), &id("u3")).unwrap();

    assert_eq!(h.size(), size_before);
    assert_eq!(h.get_user_children(&admin()), children_before);
}

#[test]
fn nobody_can_remove_the_admin() {
    let mut h = deploy(5);
    add(&mut h, &admin(), "u1", true, true);

    for caller in [admin(), id("u1")] {
        let err = h.remove_user(&caller, &admin()).unwrap_err();
        assert_eq!(err.to_string(), "You can't remove admin");
    }
    assert_eq!(h.size(), 2);
}

#[test]
fn removal_requires_remove_permission() {
    let mut h = deploy(5);
    add(&mut h, &admin(), "u1", true, false);
    add(&mut h, &admin(), "u2", false, false);

    let err = h.remove_user(&id("u1"), &id("u2")).unwrap_err();
    assert_eq!(err.to_string(), "You don't have remove permission");

    let err = h.remove_user(&id("ghost"), &id("u2")).unwrap_err();
    assert_eq!(err.to_string(), "You don't exist in hierarchy");
}

#[test]
fn removed_user_loses_its_powers() {
    let mut h = deploy(5);
    add(&mut h, &admin(), "u1", true, true);
    add(&mut h, &admin(), "u2", true, true);
    h.remove_user(&admin(), &id("u1")).unwrap();

    let price = h.calculate_price();
    let err = h.add_user(&id("u1"), id("u3"), false, false, price).unwrap_err();
    assert_eq!(err, HierarchyError::NotAMember);

    let err = h.remove_user(&id("u1"), &id("u2")).unwrap_err();
    assert_eq!(err, HierarchyError::NotAMember);
}
