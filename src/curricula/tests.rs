use super::*;

#[test]
fn test_find_known_curricula() {
    for name in names() {
        assert_eq!(find(name).unwrap().name, name);
    }
}

#[test]
fn test_find_is_case_sensitive() {
    assert!(find("Depletion").is_ok());
    assert!(find("depletion").is_err());
}

#[test]
fn test_unknown_curriculum_lists_known_names() {
    match find("NoSuchCurriculum") {
        Err(Error::UnknownCurriculum { name, known }) => {
            assert_eq!(name, "NoSuchCurriculum");
            assert_eq!(known.len(), CURRICULA.len());
            assert!(known.iter().any(|k| k == "SingleSiteMatching"));
        }
        other => panic!("expected UnknownCurriculum, got {other:?}"),
    }
}

#[test]
fn test_names_sorted_and_unique() {
    let names = names();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
}

#[test]
fn test_every_entry_enrolls_at_its_first_stage() {
    for entry in CURRICULA {
        let stages = (entry.stage_names)().unwrap();
        assert!(!stages.is_empty(), "{} has no stages", entry.name);

        let state = (entry.enroll)(None).unwrap();
        assert_eq!(state.curriculum.name, entry.name);
        assert_eq!(state.curriculum.version, entry.version);
        assert_eq!(state.stage, stages[0]);
        assert!(state.is_on_curriculum);
    }
}

#[test]
fn test_enroll_at_named_stage() {
    let entry = find(depletion::CURRICULUM_NAME).unwrap();
    let state = (entry.enroll)(Some(depletion::GRADUATION)).unwrap();
    assert_eq!(state.stage, depletion::GRADUATION);

    assert!(matches!(
        (entry.enroll)(Some("nope")),
        Err(Error::UnknownStage { .. })
    ));
}

#[test]
fn test_entry_names_match_graphs() {
    assert_eq!(depletion::curriculum().unwrap().name(), depletion::CURRICULUM_NAME);
    assert_eq!(
        depletion_stops::curriculum(depletion_stops::StopsVariant::Offset).unwrap().name(),
        "DepletionStopsOffset"
    );
    assert_eq!(
        depletion_stops::curriculum(depletion_stops::StopsVariant::Rate).unwrap().name(),
        "DepletionStopsRate"
    );
    assert_eq!(
        replenishment_depletion_offset::curriculum().unwrap().name(),
        replenishment_depletion_offset::CURRICULUM_NAME
    );
    assert_eq!(
        single_site_matching::curriculum().unwrap().name(),
        single_site_matching::CURRICULUM_NAME
    );
}
