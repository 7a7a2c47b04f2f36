//! The default key table
//!
//! One place builds the whole sequence table so the CLI `keys` subcommand
//! and the session agree on it. Notation is the vim-flavored form parsed by
//! [`war_keymap::parse_sequence`].

use war_core::Result;
use war_keymap::{parse_sequence, Binding, Keymap, Mode};

use crate::command::{Command, Scope};

fn bind(map: &mut Keymap<Command>, mode: Mode, seq: &str, binding: Binding<Command>) -> Result<()> {
    map.bind(mode, &parse_sequence(seq)?, binding)
}

/// Build the default keymap.
pub fn default_keymap() -> Result<Keymap<Command>> {
    let mut map = Keymap::new();

    let repeating: &[(&str, Command)] = &[
        ("h", Command::CursorLeft),
        ("j", Command::CursorDown),
        ("k", Command::CursorUp),
        ("l", Command::CursorRight),
        ("<a-h>", Command::LeapLeft),
        ("<a-j>", Command::LeapDown),
        ("<a-k>", Command::LeapUp),
        ("<a-l>", Command::LeapRight),
        ("<c-u>", Command::HalfViewUp),
        ("<c-d>", Command::HalfViewDown),
        ("<c-=>", Command::ZoomIn),
        ("<c-->", Command::ZoomOut),
        ("<c-a-=>", Command::ZoomInLeap),
        ("<c-a-->", Command::ZoomOutLeap),
        ("z", Command::NoteDraw),
        ("x", Command::NoteDelete),
    ];
    for &(seq, cmd) in repeating {
        bind(&mut map, Mode::Normal, seq, Binding::repeating(cmd))?;
    }

    let normal: &[(&str, Command)] = &[
        ("1", Command::Digit(1)),
        ("2", Command::Digit(2)),
        ("3", Command::Digit(3)),
        ("4", Command::Digit(4)),
        ("5", Command::Digit(5)),
        ("6", Command::Digit(6)),
        ("7", Command::Digit(7)),
        ("8", Command::Digit(8)),
        ("9", Command::Digit(9)),
        // `0` doubles as a trailing prefix digit; the editor disambiguates.
        ("0", Command::GotoLeftBound),
        ("$", Command::GotoRightBound),
        ("gg", Command::GotoTop),
        ("G", Command::GotoBottom),
        ("zz", Command::GotoMiddle),
        ("gp", Command::GotoPlayBar),
        ("w", Command::NextNoteStart),
        ("e", Command::NextNoteEnd),
        ("b", Command::PrevNoteStart),
        ("<c-0>", Command::ZoomReset),
        ("f", Command::CursorWidthWhole),
        ("s", Command::CursorWidthNumer),
        ("t", Command::CursorWidthDenom),
        ("mt", Command::NavSubCellsCol),
        ("mf", Command::NavWholeCol),
        ("da", Command::DeleteScope(Scope::All)),
        ("div", Command::DeleteScope(Scope::InView)),
        ("dov", Command::DeleteScope(Scope::OutsideView)),
        ("diw", Command::DeleteScope(Scope::InWord)),
        ("<c-a>", Command::GainUp),
        ("<c-x>", Command::GainDown),
        ("<a-0>", Command::LayerAll),
        ("<space>", Command::TogglePlay),
        ("<cr>", Command::PlayFromCursor),
        ("<space>g", Command::PlayFromLeftBound),
        ("<space>0", Command::PlayFromBeginning),
        ("<c-c>", Command::Stop),
        ("<tab>", Command::CursorBlinkCycle),
        ("<s-tab>", Command::HudCycle),
        ("u", Command::Undo),
        ("<c-r>", Command::Redo),
        ("<a-r>", Command::RedoAlt),
        ("<space>v", Command::ViewsSave),
        ("q", Command::ViewsMode),
        ("Q", Command::MidiMode),
        (":", Command::EnterCommandMode),
        ("v", Command::EnterVisual),
        ("V", Command::EnterVisualLine),
        ("<c-v>", Command::EnterVisualBlock),
        ("<esc>", Command::EscapeReset),
    ];
    for &(seq, cmd) in normal {
        bind(&mut map, Mode::Normal, seq, Binding::new(cmd))?;
    }

    // Scoped hide/show/mute/unmute under the space prefix.
    let scopes: &[(&str, Scope)] = &[
        ("iv", Scope::InView),
        ("ov", Scope::OutsideView),
        ("iw", Scope::InWord),
        ("a", Scope::All),
    ];
    for &(suffix, scope) in scopes {
        bind(
            &mut map,
            Mode::Normal,
            &format!("<space>h{suffix}"),
            Binding::new(Command::HideScope(scope)),
        )?;
        bind(
            &mut map,
            Mode::Normal,
            &format!("<space>s{suffix}"),
            Binding::new(Command::ShowScope(scope)),
        )?;
        bind(
            &mut map,
            Mode::Normal,
            &format!("<space>m{suffix}"),
            Binding::new(Command::MuteScope(scope)),
        )?;
        bind(
            &mut map,
            Mode::Normal,
            &format!("<space>um{suffix}"),
            Binding::new(Command::UnmuteScope(scope)),
        )?;
    }

    // Layer select on the space prefix, toggle on alt.
    for idx in 0..9u8 {
        bind(
            &mut map,
            Mode::Normal,
            &format!("<space>{}", idx + 1),
            Binding::new(Command::LayerSelect(idx)),
        )?;
        bind(
            &mut map,
            Mode::Normal,
            &format!("<a-{}>", idx + 1),
            Binding::new(Command::LayerToggle(idx)),
        )?;
    }

    // Views mode: slot navigation and recall. Everything else falls back to
    // the Normal table.
    let views: &[(&str, Command)] = &[
        ("k", Command::ViewsUp),
        ("j", Command::ViewsDown),
        ("<cr>", Command::ViewsRecallSelected),
        ("x", Command::ViewsDelete),
    ];
    for &(seq, cmd) in views {
        bind(&mut map, Mode::Views, seq, Binding::new(cmd))?;
    }
    for idx in 0..8u8 {
        bind(
            &mut map,
            Mode::Views,
            &format!("{}", idx + 1),
            Binding::new(Command::ViewsRecall(idx)),
        )?;
    }

    // Midi capture mode: gains, monitor, record octave, and the chromatic
    // letter row q..p plus brackets for the top two semitones.
    let midi: &[(&str, Command)] = &[
        ("k", Command::CaptureGainUp),
        ("j", Command::CaptureGainDown),
        ("K", Command::PlayGainUp),
        ("J", Command::PlayGainDown),
        ("<tab>", Command::CaptureMonitorToggle),
        ("-", Command::RecordOctave(-1)),
    ];
    for &(seq, cmd) in midi {
        bind(&mut map, Mode::Midi, seq, Binding::new(cmd))?;
    }
    for oct in 0..=8u8 {
        bind(
            &mut map,
            Mode::Midi,
            &format!("{oct}"),
            Binding::new(Command::RecordOctave(oct as i8)),
        )?;
    }
    let row = ["q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]"];
    for (degree, seq) in row.iter().enumerate() {
        bind(
            &mut map,
            Mode::Midi,
            seq,
            Binding::repeating(Command::MappedNote(degree as u8)),
        )?;
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use war_keymap::Feed;

    fn feed_str(map: &mut Keymap<Command>, mode: Mode, seq: &str) -> Vec<Command> {
        let mut out = Vec::new();
        for ev in parse_sequence(seq).unwrap() {
            match map.feed(mode, ev) {
                Feed::Command(c) => out.push(c),
                Feed::Broken { resolved, retry } => {
                    if let Some(c) = resolved {
                        out.push(c);
                    }
                    if let Feed::Command(c) = map.feed(mode, retry) {
                        out.push(c);
                    }
                }
                Feed::Pending | Feed::Unmapped(_) => {}
            }
        }
        out
    }

    #[test]
    fn motions_resolve_immediately() {
        let mut map = default_keymap().unwrap();
        assert_eq!(feed_str(&mut map, Mode::Normal, "k"), vec![Command::CursorUp]);
        assert_eq!(
            feed_str(&mut map, Mode::Normal, "<a-l>"),
            vec![Command::LeapRight]
        );
    }

    #[test]
    fn history_keys_resolve() {
        let mut map = default_keymap().unwrap();
        assert_eq!(feed_str(&mut map, Mode::Normal, "u"), vec![Command::Undo]);
        assert_eq!(feed_str(&mut map, Mode::Normal, "<c-r>"), vec![Command::Redo]);
        assert_eq!(
            feed_str(&mut map, Mode::Normal, "<a-r>"),
            vec![Command::RedoAlt]
        );
    }

    #[test]
    fn z_is_draw_and_zz_is_middle() {
        let mut map = default_keymap().unwrap();
        assert_eq!(feed_str(&mut map, Mode::Normal, "zz"), vec![Command::GotoMiddle]);
        // A broken z still draws, then the breaking key runs.
        assert_eq!(
            feed_str(&mut map, Mode::Normal, "zk"),
            vec![Command::NoteDraw, Command::CursorUp]
        );
    }

    #[test]
    fn space_is_play_and_a_prefix() {
        let mut map = default_keymap().unwrap();
        assert_eq!(
            feed_str(&mut map, Mode::Normal, "<space>v"),
            vec![Command::ViewsSave]
        );
        assert_eq!(
            feed_str(&mut map, Mode::Normal, "<space>k"),
            vec![Command::TogglePlay, Command::CursorUp]
        );
        assert_eq!(
            feed_str(&mut map, Mode::Normal, "<space>umiv"),
            vec![Command::UnmuteScope(Scope::InView)]
        );
    }

    #[test]
    fn scope_sequences_resolve() {
        let mut map = default_keymap().unwrap();
        assert_eq!(
            feed_str(&mut map, Mode::Normal, "div"),
            vec![Command::DeleteScope(Scope::InView)]
        );
        assert_eq!(
            feed_str(&mut map, Mode::Normal, "<space>ha"),
            vec![Command::HideScope(Scope::All)]
        );
    }

    #[test]
    fn views_mode_overrides_and_falls_back() {
        let mut map = default_keymap().unwrap();
        assert_eq!(feed_str(&mut map, Mode::Views, "k"), vec![Command::ViewsUp]);
        assert_eq!(
            feed_str(&mut map, Mode::Views, "3"),
            vec![Command::ViewsRecall(2)]
        );
        // Unbound in Views mode, so the Normal command applies.
        assert_eq!(feed_str(&mut map, Mode::Views, "h"), vec![Command::CursorLeft]);
    }

    #[test]
    fn midi_mode_maps_the_letter_row() {
        let mut map = default_keymap().unwrap();
        assert_eq!(
            feed_str(&mut map, Mode::Midi, "q"),
            vec![Command::MappedNote(0)]
        );
        assert_eq!(
            feed_str(&mut map, Mode::Midi, "]"),
            vec![Command::MappedNote(11)]
        );
        assert_eq!(
            feed_str(&mut map, Mode::Midi, "4"),
            vec![Command::RecordOctave(4)]
        );
        assert_eq!(
            feed_str(&mut map, Mode::Midi, "K"),
            vec![Command::PlayGainUp]
        );
    }
}
