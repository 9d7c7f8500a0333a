use sonic::catalog::loader::load_catalog;
use sonic::catalog::model::Catalog;
use sonic::lookup::finder::TimeWindowFinder;
use sonic::lookup::resolver::ArtistResolver;
use std::path::Path;

fn festival_catalog() -> Catalog {
    load_catalog(Path::new("data/events.json")).unwrap()
}

#[test_log::test]
fn should_load_festival_events_in_order() {
    let catalog = festival_catalog();

    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog.descriptions()[0], "Blaudzun");
    assert_eq!(catalog.descriptions()[6], "Blaudzun");
}

#[test_log::test]
fn should_resolve_each_description_to_its_first_event() {
    let catalog = festival_catalog();
    let resolver = ArtistResolver::new(&catalog);

    for event in catalog.events() {
        let first = catalog
            .events()
            .iter()
            .find(|other| other.description == event.description);

        assert_eq!(resolver.resolve(&event.description), first);
    }
}

#[test_log::test]
fn should_find_each_event_only_while_it_runs() {
    let catalog = festival_catalog();
    let finder = TimeWindowFinder::new(&catalog);

    for event in catalog.events() {
        let middle = (event.start_millis() + event.end_millis()) / 2;

        for time in [event.start_millis(), middle, event.end_millis() - 1] {
            assert!(
                finder.find(time, None).contains(&event),
                "{} should be running at {}",
                event.description,
                time
            );
        }

        for time in [event.start_millis() - 1, event.end_millis()] {
            assert!(
                !finder.find(time, None).contains(&event),
                "{} should not be running at {}",
                event.description,
                time
            );
        }
    }
}

#[test_log::test]
fn should_find_each_event_only_when_strictly_inside_range() {
    let catalog = festival_catalog();
    let finder = TimeWindowFinder::new(&catalog);

    for event in catalog.events() {
        let (start, end) = (event.start_millis(), event.end_millis());

        assert!(finder.find(start - 1, Some(end + 1)).contains(&event));
        assert!(!finder.find(start, Some(end + 1)).contains(&event));
        assert!(!finder.find(start - 1, Some(end)).contains(&event));
    }
}
