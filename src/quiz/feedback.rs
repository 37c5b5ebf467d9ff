//! Audio feedback: answer tones and read-aloud of question text.

use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, warn};

/// A short triangle-wave beep describing an answer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
  pub frequency_hz: f32,
  pub duration: Duration,
  pub gain: f32,
}

impl Tone {
  /// High pitch for a correct answer, low for a miss.
  pub fn for_answer(correct: bool) -> Self {
    Self {
      frequency_hz: if correct { 880.0 } else { 220.0 },
      duration: Duration::from_millis(250),
      gain: 0.2,
    }
  }
}

/// Text to read aloud, with the speaking rate and pitch the tutor uses.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
  pub text: String,
  pub rate: f32,
  pub pitch: f32,
}

impl Utterance {
  pub fn new(text: impl Into<String>) -> Self {
    Self { text: text.into(), rate: 0.95, pitch: 1.05 }
  }
}

/// Output device for tones and speech.
pub trait FeedbackPlayer {
  fn play_tone(&mut self, tone: Tone);
  fn speak(&mut self, utterance: &Utterance);
}

/// Terminal output: rings the bell for tones, shells out to a TTS command for speech.
#[derive(Debug, Default)]
pub struct TerminalFeedback {
  /// e.g. `espeak` or `say`; None disables speech.
  pub speech_command: Option<String>,
}

impl FeedbackPlayer for TerminalFeedback {
  fn play_tone(&mut self, tone: Tone) {
    // One bell for a hit, two for a miss.
    let bells = if tone.frequency_hz >= 440.0 { "\x07" } else { "\x07\x07" };
    eprint!("{bells}");
    debug!(target: "math_tutor", frequency = tone.frequency_hz, "Tone played");
  }

  fn speak(&mut self, utterance: &Utterance) {
    let Some(cmd) = self.speech_command.as_deref() else {
      debug!(target: "math_tutor", "Speech disabled");
      return;
    };
    let spawned = Command::new(cmd)
      .arg(&utterance.text)
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .spawn();
    if let Err(e) = spawned {
      warn!(target: "math_tutor", command = cmd, error = %e, "Text-to-speech command failed");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tones_differ_by_correctness() {
    let hit = Tone::for_answer(true);
    let miss = Tone::for_answer(false);
    assert_eq!(hit.frequency_hz, 880.0);
    assert_eq!(miss.frequency_hz, 220.0);
    assert_eq!(hit.duration, Duration::from_millis(250));
  }

  #[test]
  fn utterance_defaults() {
    let u = Utterance::new("What is 2 + 2?");
    assert_eq!((u.rate, u.pitch), (0.95, 1.05));
  }
}
