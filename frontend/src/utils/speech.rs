//! Voice output for the assistant panel.
//!
//! Speech synthesis is feature-detected; on browsers without it these
//! functions are silent no-ops.

use web_sys::SpeechSynthesisUtterance;

/// Speak a reply aloud, cancelling anything still being spoken so replies
/// never queue up behind each other.
pub fn speak(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(synth) = window.speech_synthesis() else {
        return;
    };
    synth.cancel();
    if let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) {
        synth.speak(&utterance);
    }
}

/// Stop any in-progress speech.
pub fn stop() {
    if let Some(window) = web_sys::window() {
        if let Ok(synth) = window.speech_synthesis() {
            synth.cancel();
        }
    }
}
