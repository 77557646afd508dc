//! Order maintenance for a team's member list
//!
//! Every operation takes the current list by reference and returns a new
//! list sorted by position. `append`, `remove` and `swap` leave positions as
//! the dense sequence `0..N`. `bulk_reposition` is the raw primitive beneath
//! them and trusts the caller to keep the sequence dense.

use std::collections::HashMap;

use uuid::Uuid;

use super::errors::{RosterError, RosterResult, MINIMUM_MEMBERS};
use super::member::{Member, PositionAssignment};

/// Appends a new member at the end of the rotation
///
/// # Example
/// ```
/// use presenter_rotation_api::domain::{member::Member, ordering};
///
/// let members = vec![Member::new("Alice", 0).unwrap(), Member::new("Bob", 1).unwrap()];
/// let members = ordering::append(&members, "Carol").expect("valid name");
///
/// assert_eq!(members[2].name(), "Carol");
/// assert_eq!(members[2].position(), 2);
/// ```
pub fn append(members: &[Member], name: &str) -> RosterResult<Vec<Member>> {
    let next_position = u32::try_from(members.len())
        .map_err(|_| RosterError::validation("Member list is full"))?;
    let member = Member::new(name, next_position)?;

    let mut result = sorted(members);
    result.push(member);
    Ok(result)
}

/// Removes a member and compacts the positions of everyone after it
///
/// # Returns
/// * `Err(RosterError::NotFound)` - If `target` is not in the list
/// * `Err(RosterError::MinimumMembers)` - If fewer than two members would remain
pub fn remove(members: &[Member], target: Uuid) -> RosterResult<Vec<Member>> {
    if !members.iter().any(|m| m.id() == target) {
        return Err(RosterError::member_not_found(target));
    }
    if members.len() - 1 < MINIMUM_MEMBERS {
        return Err(RosterError::MinimumMembers {
            minimum: MINIMUM_MEMBERS,
        });
    }

    let survivors: Vec<Member> = sorted(members)
        .into_iter()
        .filter(|m| m.id() != target)
        .collect();
    let compacted: Vec<PositionAssignment> = survivors
        .iter()
        .zip(0u32..)
        .map(|(m, position)| PositionAssignment::new(m.id(), position))
        .collect();

    bulk_reposition(&survivors, &compacted)
}

/// Exchanges the positions of two members
///
/// Applying the same swap twice restores the original order.
pub fn swap(members: &[Member], first: Uuid, second: Uuid) -> RosterResult<Vec<Member>> {
    let first_position = position_of(members, first)?;
    let second_position = position_of(members, second)?;

    bulk_reposition(
        members,
        &[
            PositionAssignment::new(first, second_position),
            PositionAssignment::new(second, first_position),
        ],
    )
}

/// Applies a batch of position assignments, all or nothing
///
/// Members not named in `assignments` keep their position. Global
/// contiguity is not checked here.
pub fn bulk_reposition(
    members: &[Member],
    assignments: &[PositionAssignment],
) -> RosterResult<Vec<Member>> {
    let mut targets: HashMap<Uuid, u32> = HashMap::with_capacity(assignments.len());
    for assignment in assignments {
        if !members.iter().any(|m| m.id() == assignment.member_id) {
            return Err(RosterError::member_not_found(assignment.member_id));
        }
        targets.insert(assignment.member_id, assignment.position);
    }

    let result: Vec<Member> = members
        .iter()
        .map(|m| match targets.get(&m.id()) {
            Some(&position) => m.at_position(position),
            None => m.clone(),
        })
        .collect();

    Ok(sorted(&result))
}

/// Describes the current order as position assignments, ready to persist
pub fn positions(members: &[Member]) -> Vec<PositionAssignment> {
    members
        .iter()
        .map(|m| PositionAssignment::new(m.id(), m.position()))
        .collect()
}

/// Checks that positions are exactly `0..N` with no gaps or duplicates
pub fn is_contiguous(members: &[Member]) -> bool {
    let mut seen: Vec<u32> = members.iter().map(Member::position).collect();
    seen.sort_unstable();
    seen.iter().zip(0u32..).all(|(&actual, expected)| actual == expected)
}

fn position_of(members: &[Member], id: Uuid) -> RosterResult<u32> {
    members
        .iter()
        .find(|m| m.id() == id)
        .map(Member::position)
        .ok_or_else(|| RosterError::member_not_found(id))
}

fn sorted(members: &[Member]) -> Vec<Member> {
    let mut result = members.to_vec();
    result.sort_by_key(Member::position);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<Member> {
        names
            .iter()
            .zip(0u32..)
            .map(|(name, position)| Member::new(name, position).unwrap())
            .collect()
    }

    fn names(members: &[Member]) -> Vec<&str> {
        members.iter().map(Member::name).collect()
    }

    #[test]
    fn append_adds_member_at_end() {
        let members = roster(&["Alice", "Bob"]);

        let result = append(&members, "Carol").unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(names(&result), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(result[0], members[0]);
        assert_eq!(result[1], members[1]);
        assert_eq!(result[2].position(), 2);
        assert!(is_contiguous(&result));
    }

    #[test]
    fn append_rejects_blank_name() {
        let members = roster(&["Alice", "Bob"]);

        assert!(matches!(
            append(&members, "  "),
            Err(RosterError::Validation(_))
        ));
    }

    #[test]
    fn remove_compacts_positions_and_keeps_order() {
        let members = roster(&["Alice", "Bob", "Carol", "Dave"]);

        let result = remove(&members, members[1].id()).unwrap();

        assert_eq!(names(&result), vec!["Alice", "Carol", "Dave"]);
        let positions: Vec<u32> = result.iter().map(Member::position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn remove_every_member_of_larger_roster_stays_contiguous() {
        let members = roster(&["A", "B", "C", "D", "E"]);

        for target in &members {
            let result = remove(&members, target.id()).unwrap();

            assert_eq!(result.len(), members.len() - 1);
            assert!(is_contiguous(&result));
            let expected: Vec<&str> = members
                .iter()
                .filter(|m| m.id() != target.id())
                .map(Member::name)
                .collect();
            assert_eq!(names(&result), expected);
        }
    }

    #[test]
    fn remove_below_minimum_fails() {
        let members = roster(&["Alice", "Bob"]);
        let before = members.clone();

        let result = remove(&members, members[0].id());

        assert_eq!(result, Err(RosterError::MinimumMembers { minimum: 2 }));
        assert_eq!(members, before);
    }

    #[test]
    fn remove_unknown_member_fails() {
        let members = roster(&["Alice", "Bob", "Carol"]);
        let unknown = Uuid::new_v4();

        assert_eq!(
            remove(&members, unknown),
            Err(RosterError::member_not_found(unknown))
        );
    }

    #[test]
    fn swap_exchanges_positions() {
        let members = roster(&["Alice", "Bob"]);
        let (alice, bob) = (members[0].id(), members[1].id());

        let result = swap(&members, alice, bob).unwrap();

        let find = |id: Uuid| result.iter().find(|m| m.id() == id).unwrap().position();
        assert_eq!(find(alice), 1);
        assert_eq!(find(bob), 0);
        assert_eq!(names(&result), vec!["Bob", "Alice"]);
    }

    #[test]
    fn swap_leaves_other_members_alone() {
        let members = roster(&["Alice", "Bob", "Carol", "Dave"]);

        let result = swap(&members, members[0].id(), members[3].id()).unwrap();

        assert_eq!(names(&result), vec!["Dave", "Bob", "Carol", "Alice"]);
        assert_eq!(result[1], members[1]);
        assert_eq!(result[2], members[2]);
    }

    #[test]
    fn swap_twice_restores_original() {
        let members = roster(&["Alice", "Bob", "Carol"]);
        let (a, c) = (members[0].id(), members[2].id());

        let once = swap(&members, a, c).unwrap();
        let twice = swap(&once, a, c).unwrap();

        assert_eq!(twice, members);
    }

    #[test]
    fn swap_with_unknown_member_fails() {
        let members = roster(&["Alice", "Bob"]);
        let unknown = Uuid::new_v4();

        assert_eq!(
            swap(&members, members[0].id(), unknown),
            Err(RosterError::member_not_found(unknown))
        );
    }

    #[test]
    fn bulk_reposition_is_all_or_nothing() {
        let members = roster(&["Alice", "Bob", "Carol"]);
        let unknown = Uuid::new_v4();

        let result = bulk_reposition(
            &members,
            &[
                PositionAssignment::new(members[0].id(), 2),
                PositionAssignment::new(unknown, 0),
            ],
        );

        assert_eq!(result, Err(RosterError::member_not_found(unknown)));
    }

    #[test]
    fn bulk_reposition_reorders_list() {
        let members = roster(&["Alice", "Bob", "Carol"]);

        let result = bulk_reposition(
            &members,
            &[
                PositionAssignment::new(members[0].id(), 2),
                PositionAssignment::new(members[2].id(), 0),
            ],
        )
        .unwrap();

        assert_eq!(names(&result), vec!["Carol", "Bob", "Alice"]);
    }

    #[test]
    fn bulk_reposition_does_not_enforce_contiguity() {
        let members = roster(&["Alice", "Bob"]);

        let result =
            bulk_reposition(&members, &[PositionAssignment::new(members[1].id(), 7)]).unwrap();

        assert!(!is_contiguous(&result));
        assert_eq!(result[1].position(), 7);
    }

    #[test]
    fn positions_mirror_the_list() {
        let members = roster(&["Alice", "Bob"]);

        let assignments = positions(&members);

        assert_eq!(
            assignments,
            vec![
                PositionAssignment::new(members[0].id(), 0),
                PositionAssignment::new(members[1].id(), 1),
            ]
        );
    }

    #[test]
    fn contiguity_detects_gaps_and_duplicates() {
        let alice = Member::from_persistence(Uuid::new_v4(), "Alice".into(), 0);
        let bob = Member::from_persistence(Uuid::new_v4(), "Bob".into(), 2);
        let carol = Member::from_persistence(Uuid::new_v4(), "Carol".into(), 0);

        assert!(!is_contiguous(&[alice.clone(), bob]));
        assert!(!is_contiguous(&[alice.clone(), carol]));
        assert!(is_contiguous(&[alice]));
        assert!(is_contiguous(&[]));
    }
}
