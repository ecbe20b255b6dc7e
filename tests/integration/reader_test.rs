//! Playback scenarios driven through the public library API

use readalong::content::{Chapter, Note, Sentence};
use readalong::reader::{
    apply, Command, PlaybackEngine, PlaybackOptions, PlaybackPosition, Status,
};
use readalong::speech::{ScriptedSpeech, SpeechDriver};

use crate::helpers::fixtures_dir;

const PRESETS: [f64; 3] = [0.8, 1.0, 1.2];

fn load_fixture() -> Chapter {
    Chapter::load(&fixtures_dir().join("chapter1.json")).expect("fixture should load")
}

fn engine(options: PlaybackOptions) -> PlaybackEngine<ScriptedSpeech> {
    PlaybackEngine::new(load_fixture(), ScriptedSpeech::new(), options)
}

fn boundary(engine: &mut PlaybackEngine<ScriptedSpeech>, char_index: usize) {
    let event = engine.driver().boundary(char_index).expect("nothing in flight");
    engine.handle_speech_event(event);
}

fn finish(engine: &mut PlaybackEngine<ScriptedSpeech>) {
    let event = engine.driver_mut().finish().expect("nothing in flight");
    engine.handle_speech_event(event);
}

#[test]
fn fixture_loads_with_notes_and_translations() {
    let chapter = load_fixture();

    assert_eq!(chapter.book_title, "Fables");
    assert_eq!(chapter.len(), 3);
    assert_eq!(chapter.note_count(), 3);
    assert_eq!(chapter.sentences[0].translation, "빠른 여우");
    assert!(chapter.sentences[2].notes.is_empty());
    assert!(chapter.validate().is_empty());
}

#[test]
fn cursor_tracks_annotated_phrase() {
    let mut engine = engine(PlaybackOptions::default());
    apply(&mut engine, Command::Start, &PRESETS);

    boundary(&mut engine, 0);
    assert!(!engine.active_span().unwrap().is_annotated());

    boundary(&mut engine, 4);
    let span = engine.active_span().unwrap();
    assert_eq!(span.text, "quick");
    assert_eq!(span.note.as_ref().unwrap().meaning, "빠른");

    boundary(&mut engine, 10);
    assert_eq!(engine.active_span().unwrap().text, " fox");
}

#[test]
fn reading_session_earns_one_star_per_sentence() {
    let mut engine = engine(PlaybackOptions::default());
    apply(&mut engine, Command::Start, &PRESETS);

    finish(&mut engine);
    finish(&mut engine);
    finish(&mut engine);

    assert_eq!(engine.stars(), 3);
    assert!(!engine.mode().is_playing);
    assert_eq!(engine.status(), Status::Idle);
    assert_eq!(engine.progress(), 1.0);
    assert_eq!(
        engine.driver().spoken_texts(),
        vec!["The quick fox", "jumps over the lazy dog", "and runs away"]
    );
}

#[test]
fn skipping_ahead_cancels_without_star() {
    let mut engine = engine(PlaybackOptions::default());
    apply(&mut engine, Command::Start, &PRESETS);
    let first = engine.driver().active().unwrap();

    assert!(apply(&mut engine, Command::NextSentence, &PRESETS));
    engine.handle_speech_event(readalong::speech::SpeechEvent::End { utterance: first });

    assert_eq!(engine.stars(), 0);
    assert_eq!(engine.position(), PlaybackPosition::new(1, 0));
    assert_eq!(engine.driver().last_spoken().unwrap().text, "jumps over the lazy dog");
}

#[test]
fn navigation_is_bounded_by_the_chapter() {
    let mut engine = engine(PlaybackOptions::default());

    assert!(!apply(&mut engine, Command::PrevSentence, &PRESETS));
    assert!(!apply(&mut engine, Command::JumpTo(3), &PRESETS));
    assert!(apply(&mut engine, Command::JumpTo(2), &PRESETS));
    assert!(!apply(&mut engine, Command::NextSentence, &PRESETS));
    assert_eq!(engine.position(), PlaybackPosition::new(2, 0));
    assert!(engine.driver().spoken().is_empty());
}

#[test]
fn paged_session_reads_a_page_and_pages_forward() {
    let mut engine = engine(PlaybackOptions {
        page_size: 2,
        ..PlaybackOptions::default()
    });
    apply(&mut engine, Command::Start, &PRESETS);

    finish(&mut engine);
    finish(&mut engine);
    assert!(!engine.mode().is_playing);

    assert!(apply(&mut engine, Command::NextPage, &PRESETS));
    assert_eq!(engine.position(), PlaybackPosition::new(2, 0));
    assert_eq!(engine.page_sentences().len(), 1);
    assert!(!apply(&mut engine, Command::NextPage, &PRESETS));
}

#[test]
fn speed_presets_apply_to_next_sentence() {
    let mut engine = engine(PlaybackOptions::default());
    apply(&mut engine, Command::Start, &PRESETS);

    assert!(apply(&mut engine, Command::CycleSpeed, &PRESETS));
    assert_eq!(engine.mode().speed, 1.2);
    finish(&mut engine);

    let rates: Vec<f64> = engine.driver().spoken().iter().map(|u| u.rate).collect();
    assert_eq!(rates, vec![1.0, 1.2]);
}

#[test]
fn quiz_mode_masks_until_revealed() {
    let mut engine = engine(PlaybackOptions {
        quiz_mode: true,
        ..PlaybackOptions::default()
    });
    apply(&mut engine, Command::Start, &PRESETS);
    let quiz = engine.mode().is_quiz_mode;
    let spans = engine.current_spans().to_vec();

    assert!(engine.reveal(0).is_masked(quiz, &spans, 1, None));

    assert!(apply(&mut engine, Command::ToggleReveal(0), &PRESETS));
    assert!(!engine.reveal(0).is_masked(quiz, &spans, 1, None));
}

#[test]
fn scripted_driver_reports_its_name() {
    assert_eq!(ScriptedSpeech::new().name(), "scripted");
}
