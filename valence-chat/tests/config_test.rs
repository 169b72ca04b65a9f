//! Config parsing and bundled template integration tests

use std::path::PathBuf;

use valence_core::{
    load_templates, DialogueConfig, Goal, MemoryTranscript, Session, SessionOutcome, SlotKey,
    TranscriptEntry,
};

fn bundled_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static/en/verbalisations.txt")
}

#[test]
fn test_full_config_parses() {
    let toml_str = r#"
[chat]
lang = "en"
static_dir = "/usr/share/valence-chat"
data_dir = "/var/lib/valence-chat"

[dialogue]
max_goal_attempts = 25
disallow_repeats = false
end_sentinel = "bye"
closing_message = "That's all, thanks."
seed = 42
"#;

    let config: toml::Value = toml::from_str(toml_str).expect("valid TOML");

    let chat = config.get("chat").expect("chat section");
    assert_eq!(chat.get("lang").unwrap().as_str().unwrap(), "en");
    assert_eq!(
        chat.get("data_dir").unwrap().as_str().unwrap(),
        "/var/lib/valence-chat"
    );

    let dialogue: DialogueConfig = config
        .get("dialogue")
        .expect("dialogue section")
        .clone()
        .try_into()
        .expect("dialogue config");
    assert_eq!(dialogue.max_goal_attempts, 25);
    assert!(!dialogue.disallow_repeats);
    assert_eq!(dialogue.end_sentinel, "bye");
    assert_eq!(dialogue.closing_message, "That's all, thanks.");
    assert_eq!(dialogue.seed, Some(42));
}

#[test]
fn test_empty_dialogue_section_uses_defaults() {
    let config: toml::Value = toml::from_str("[dialogue]\n").expect("valid TOML");
    let dialogue: DialogueConfig = config["dialogue"].clone().try_into().unwrap();
    assert_eq!(dialogue, DialogueConfig::default());
}

#[test]
fn test_bundled_templates_load() {
    let store = load_templates(bundled_templates()).expect("bundled templates");

    // Comment and malformed lines are skipped
    assert_eq!(store.pattern_count(), 16);
    assert_eq!(store.template_count(), 32);

    for slot in SlotKey::ALL {
        let pattern = format!("<concept:{}>", slot);
        assert!(
            !store.exact(&pattern).is_empty(),
            "no template for {}",
            pattern
        );
    }

    let counterfactual = &store.exact("<concept:valence:counterfactuals>")[0];
    assert!(counterfactual.counterfactual);
    assert!(!counterfactual.explanation);

    // The parent pattern reaches every definition template
    assert_eq!(store.generalized("<concept:definition>").len(), 7);
}

#[test]
fn test_scripted_concept_session() {
    let store = load_templates(bundled_templates()).unwrap();
    let mut session = Session::new(
        store,
        DialogueConfig::default().with_seed(11),
        MemoryTranscript::new(),
    );
    let mut output = Vec::new();
    let answers = "a small pet\nkitten\ngood\nvery common\nq\n";

    let outcome = session
        .converse("cat", false, answers.as_bytes(), &mut output)
        .unwrap();
    assert_eq!(outcome, SessionOutcome::EndedByRespondent { answers: 4 });

    let frame = session.controller().current_frame().unwrap();
    assert!(frame.is_satisfied());

    // Every question shown names the concept
    let shown = String::from_utf8(output).unwrap();
    let questions: Vec<&str> = shown
        .split("BOT >> ")
        .skip(1)
        .map(|q| q.trim_end_matches("HUM >> ").trim())
        .collect();
    assert_eq!(questions.len(), 5);
    assert!(questions.iter().all(|q| q.contains("cat")));
}

#[test]
fn test_scripted_individual_session() {
    let store = load_templates(bundled_templates()).unwrap();
    let mut session = Session::new(
        store,
        DialogueConfig::default().with_seed(4),
        MemoryTranscript::new(),
    );
    let answers = "a mathematician\nthe analytical engine\nq\n";

    let outcome = session
        .converse("Ada Lovelace", true, answers.as_bytes(), Vec::new())
        .unwrap();
    assert_eq!(outcome.answers(), 2);

    // Only the definition and instances are ever asked about an individual
    for entry in session.transcript().entries() {
        if let TranscriptEntry::Bot {
            goal: Some(goal), ..
        } = entry
        {
            assert!(matches!(
                goal,
                Goal::Slot(SlotKey::DefinitionSurfaceForm) | Goal::Slot(SlotKey::Instances)
            ));
        }
    }
    assert!(session.controller().current_frame().unwrap().is_satisfied());
}
