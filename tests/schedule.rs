use indexmap::{IndexMap, IndexSet};
use roomsat::cnf::formula::Assignment;
use roomsat::sat::dpll::{is_sat, solve_model};
use roomsat::schedule::encode::{
    boolify_scheduling_problem, decode_assignment, decode_var, occupancy_var,
};

fn prefs(entries: &[(&str, &[&str])]) -> IndexMap<String, IndexSet<String>> {
    entries
        .iter()
        .map(|(student, rooms)| {
            (
                student.to_string(),
                rooms.iter().map(|room| room.to_string()).collect(),
            )
        })
        .collect()
}

fn caps(entries: &[(&str, usize)]) -> IndexMap<String, usize> {
    entries
        .iter()
        .map(|(room, capacity)| (room.to_string(), *capacity))
        .collect()
}

#[test]
fn one_student_two_rooms_takes_exactly_one() {
    let formula = boolify_scheduling_problem(
        &prefs(&[("a", &["r1", "r2"])]),
        &caps(&[("r1", 1), ("r2", 1)]),
    )
    .expect("encode");

    let model = solve_model(&formula).expect("satisfiable");
    let chosen: Vec<_> = model.iter().filter(|(_, &v)| v).collect();
    assert_eq!(chosen.len(), 1);

    // every satisfying assignment over the two occupancy variables sets
    // exactly one of them
    let vars: Vec<_> = formula.variables().into_iter().collect();
    assert_eq!(vars.len(), 2);
    for mask in 0u32..4 {
        let assignment: Assignment = vars
            .iter()
            .enumerate()
            .map(|(i, var)| (var.clone(), mask & (1 << i) != 0))
            .collect();
        let true_count = assignment.values().filter(|&&v| v).count();
        assert_eq!(formula.eval(&assignment), true_count == 1);
    }
}

#[test]
fn two_students_one_seat_is_unsat() {
    let formula = boolify_scheduling_problem(
        &prefs(&[("a", &["r1"]), ("b", &["r1"])]),
        &caps(&[("r1", 1)]),
    )
    .expect("encode");
    assert!(!is_sat(&formula));
}

#[test]
fn clause_families_have_expected_sizes() {
    let formula = boolify_scheduling_problem(
        &prefs(&[("a", &["r1", "r2"]), ("b", &["r1", "r2"])]),
        &caps(&[("r1", 1), ("r2", 2)]),
    )
    .expect("encode");

    // 2 preference + 2 exclusivity pairs + 1 capacity subset for r1; r2
    // fits everyone and emits nothing
    assert_eq!(formula.clause_count(), 5);
    assert_eq!(formula.literal_count(), 10);
}

#[test]
fn roomy_rooms_emit_no_capacity_clauses() {
    let formula = boolify_scheduling_problem(
        &prefs(&[("a", &["r1"]), ("b", &["r1"])]),
        &caps(&[("r1", 10)]),
    )
    .expect("encode");
    // one room means no exclusivity pairs either
    assert_eq!(formula.clause_count(), 2);
}

#[test]
fn separator_in_a_name_is_rejected() {
    assert!(boolify_scheduling_problem(&prefs(&[("a_b", &["r1"])]), &caps(&[("r1", 1)])).is_err());
    assert!(boolify_scheduling_problem(&prefs(&[("a", &["r_1"])]), &caps(&[("r_1", 1)])).is_err());
}

#[test]
fn occupancy_variables_decode_back() {
    let var = occupancy_var("alice", "kitchen");
    assert_eq!(decode_var(&var), Some(("alice", "kitchen")));
}

#[test]
fn three_students_two_rooms_schedule_is_valid() {
    let preferences = prefs(&[
        ("alice", &["kitchen", "pantry"]),
        ("bob", &["kitchen"]),
        ("carol", &["kitchen", "pantry"]),
    ]);
    let capacities = caps(&[("kitchen", 2), ("pantry", 1)]);
    let formula = boolify_scheduling_problem(&preferences, &capacities).expect("encode");

    let model = solve_model(&formula).expect("satisfiable");
    assert!(formula.eval(&model));

    let placement = decode_assignment(&model);
    assert_eq!(placement.len(), 3);
    let mut occupancy: IndexMap<&str, usize> = IndexMap::new();
    for (&student, &room) in &placement {
        assert!(preferences[student].contains(room), "{student} in {room}");
        *occupancy.entry(room).or_insert(0) += 1;
    }
    for (room, count) in occupancy {
        assert!(count <= capacities[room], "{room} over capacity");
    }
}

#[test]
fn impossible_instances_encode_to_unsat() {
    // a student with no acceptable room
    let empty_prefs = boolify_scheduling_problem(&prefs(&[("a", &[])]), &caps(&[("r1", 1)]))
        .expect("encode");
    assert!(!is_sat(&empty_prefs));

    // a room nobody fits into
    let zero_cap = boolify_scheduling_problem(&prefs(&[("a", &["r1"])]), &caps(&[("r1", 0)]))
        .expect("encode");
    assert!(!is_sat(&zero_cap));
}

#[test]
fn three_into_a_two_seat_room_is_unsat() {
    let formula = boolify_scheduling_problem(
        &prefs(&[("a", &["r1"]), ("b", &["r1"]), ("c", &["r1"])]),
        &caps(&[("r1", 2)]),
    )
    .expect("encode");
    assert!(!is_sat(&formula));
}
