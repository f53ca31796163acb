use traitmap::{
    BatchMode, ConformanceRegistry, Describe, MemberListing, MethodSignature, ProtocolSpec,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn to_string_sig() -> MethodSignature {
    MethodSignature::new().receiver().returns("String")
}

fn protocol(name: &str, member: &str) -> ProtocolSpec {
    ProtocolSpec::builder(name)
        .method(member, to_string_sig())
        .build()
}

struct Widget;

impl Describe for Widget {
    fn qualified_name() -> &'static str {
        "demo::Widget"
    }

    fn member_listing() -> MemberListing {
        MemberListing::new()
            .method("to_string", to_string_sig())
            .method("other", to_string_sig())
    }
}

#[test]
fn reverification_is_idempotent() {
    init_logging();
    let registry = ConformanceRegistry::new();
    let printable = protocol("printer::Printable", "to_string");

    registry.verify_and_register::<Widget>(&[&printable]).unwrap();
    let first = registry.protocols_implemented::<Widget>();

    registry.verify_and_register::<Widget>(&[&printable]).unwrap();
    assert_eq!(registry.protocols_implemented::<Widget>(), first);
    assert_eq!(first, vec!["printer::Printable".to_string()]);
}

#[test]
fn records_accumulate_across_separate_verifications() {
    init_logging();
    let registry = ConformanceRegistry::new();

    registry
        .verify_and_register::<Widget>(&[&protocol("printer::Printable", "to_string")])
        .unwrap();
    registry
        .verify_and_register::<Widget>(&[&protocol("printer::Otherable", "other")])
        .unwrap();

    assert_eq!(
        registry.protocols_implemented::<Widget>(),
        vec![
            "printer::Otherable".to_string(),
            "printer::Printable".to_string()
        ]
    );
}

#[test]
fn accumulation_is_order_independent() {
    let a = protocol("printer::Printable", "to_string");
    let b = protocol("printer::Otherable", "other");

    let forward = ConformanceRegistry::new();
    forward.verify_and_register::<Widget>(&[&a]).unwrap();
    forward.verify_and_register::<Widget>(&[&b]).unwrap();

    let backward = ConformanceRegistry::new();
    backward.verify_and_register::<Widget>(&[&b]).unwrap();
    backward.verify_and_register::<Widget>(&[&a]).unwrap();

    assert_eq!(
        forward.protocols_implemented::<Widget>(),
        backward.protocols_implemented::<Widget>()
    );
}

#[test]
fn atomic_batch_commits_nothing_on_failure() {
    init_logging();
    let registry = ConformanceRegistry::new();
    let unsatisfied = protocol("audio::Playable", "play");
    let satisfied = protocol("printer::Printable", "to_string");

    let result = registry.verify_and_register::<Widget>(&[&unsatisfied, &satisfied]);
    assert!(result.is_err());
    assert!(registry.protocols_implemented::<Widget>().is_empty());
}

#[test]
fn per_protocol_batch_keeps_earlier_successes() {
    init_logging();
    let registry = ConformanceRegistry::new();
    let unsatisfied = protocol("audio::Playable", "play");
    let satisfied = protocol("printer::Printable", "to_string");

    // checks run in reverse declaration order, so the satisfied protocol is
    // checked and committed before the unsatisfied one fails the batch
    let result = registry.verify_and_register_with::<Widget>(
        &[&unsatisfied, &satisfied],
        BatchMode::PerProtocol,
    );
    assert!(result.is_err());
    assert_eq!(
        registry.protocols_implemented::<Widget>(),
        vec!["printer::Printable".to_string()]
    );
}

#[test]
fn atomic_batch_commits_everything_on_success() {
    let registry = ConformanceRegistry::new();
    let a = protocol("printer::Printable", "to_string");
    let b = protocol("printer::Otherable", "other");

    registry.verify_and_register::<Widget>(&[&a, &b]).unwrap();
    assert_eq!(registry.protocols_implemented::<Widget>().len(), 2);
}

#[test]
fn failed_batch_never_disturbs_an_existing_record() {
    let registry = ConformanceRegistry::new();
    registry
        .verify_and_register::<Widget>(&[&protocol("printer::Printable", "to_string")])
        .unwrap();

    for mode in [BatchMode::Atomic, BatchMode::PerProtocol] {
        let result = registry
            .verify_and_register_with::<Widget>(&[&protocol("audio::Playable", "play")], mode);
        assert!(result.is_err());
        assert_eq!(
            registry.protocols_implemented::<Widget>(),
            vec!["printer::Printable".to_string()]
        );
    }
}

#[test]
fn concurrent_verifications_of_one_type_lose_no_updates() {
    init_logging();
    let registry = ConformanceRegistry::new();
    let protocols: Vec<ProtocolSpec> = ["printer::Printable", "fmt::Stringable", "repr::Textual"]
        .iter()
        .map(|name| protocol(name, "to_string"))
        .collect();

    std::thread::scope(|scope| {
        for spec in &protocols {
            let registry = &registry;
            scope.spawn(move || {
                registry.verify_and_register::<Widget>(&[spec]).unwrap();
            });
        }
    });

    assert_eq!(
        registry.protocols_implemented::<Widget>(),
        vec![
            "fmt::Stringable".to_string(),
            "printer::Printable".to_string(),
            "repr::Textual".to_string()
        ]
    );
}

#[test]
fn distinct_types_have_distinct_records() {
    struct Gadget;
    impl Describe for Gadget {
        fn member_listing() -> MemberListing {
            MemberListing::new().method("other", to_string_sig())
        }
    }

    let registry = ConformanceRegistry::new();
    registry
        .verify_and_register::<Widget>(&[&protocol("printer::Printable", "to_string")])
        .unwrap();
    registry
        .verify_and_register::<Gadget>(&[&protocol("printer::Otherable", "other")])
        .unwrap();

    assert_eq!(
        registry.protocols_implemented::<Widget>(),
        vec!["printer::Printable".to_string()]
    );
    assert_eq!(
        registry.protocols_implemented::<Gadget>(),
        vec!["printer::Otherable".to_string()]
    );
}
