//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::SessionSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{format_volume, Item};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Which screen the front end is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    HowToPlay,
    Game,
}

const BG: Rgb = Rgb::new(26, 26, 26);
const WHITE: Rgb = Rgb::new(255, 255, 255);
const GREY: Rgb = Rgb::new(170, 170, 170);
const GOLD: Rgb = Rgb::new(255, 201, 60);
const GREEN: Rgb = Rgb::new(76, 175, 80);
const RED: Rgb = Rgb::new(244, 67, 54);
const PANEL: Rgb = Rgb::new(40, 40, 48);

const HOW_TO_PLAY: &[(&str, &[&str])] = &[
    (
        "Game Rules",
        &[
            "1. You'll be shown two search terms",
            "2. Guess which term has more monthly searches",
            "3. Choose \"HIGHER\" or \"LOWER\" to make your guess",
            "4. Each correct guess adds to your score",
            "5. Game ends when you make a wrong guess",
        ],
    ),
    (
        "Tips",
        &[
            "• Think about current trends",
            "• Consider popular topics",
            "• Trust your instincts",
            "• Learn from your mistakes",
        ],
    ),
    (
        "Scoring",
        &[
            "• Each correct guess = 1 point",
            "• Try to beat your high score",
            "• High scores are saved locally",
        ],
    ),
];

/// Renders the three screens. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render into a fresh framebuffer.
    pub fn render(&self, screen: Screen, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, snap, viewport, &mut fb);
        fb
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        screen: Screen,
        snap: &SessionSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(WHITE, BG).into_cell(' '));

        match screen {
            Screen::Home => self.draw_home(snap, fb),
            Screen::HowToPlay => self.draw_how_to_play(fb),
            Screen::Game => {
                self.draw_game(snap, fb);
                if snap.is_game_over {
                    self.draw_game_over(snap, fb);
                }
            }
        }
    }

    fn draw_home(&self, snap: &SessionSnapshot, fb: &mut FrameBuffer) {
        let w = fb.width();
        let top = fb.height().saturating_sub(9) / 2;

        fb.put_str_centered(0, w, top, "HIGHER or LOWER", CellStyle::new(GOLD, BG).bold());
        fb.put_str_centered(0, w, top + 1, "Up or Nah?", CellStyle::new(GREY, BG));
        fb.put_str_centered(
            0,
            w,
            top + 3,
            &format!("Best: {}", snap.high_score),
            CellStyle::new(WHITE, BG),
        );
        fb.put_str_centered(0, w, top + 5, " PLAY NOW  [Enter] ", CellStyle::new(WHITE, GREEN).bold());
        fb.put_str_centered(0, w, top + 7, " HOW TO PLAY  [?] ", CellStyle::new(WHITE, PANEL));
        fb.put_str_centered(0, w, top + 9, "q to quit", CellStyle::new(GREY, BG).dim());
    }

    fn draw_how_to_play(&self, fb: &mut FrameBuffer) {
        let w = fb.width();
        let mut y = 1;
        fb.put_str_centered(0, w, y, "How To Play", CellStyle::new(GOLD, BG).bold());
        y += 2;

        let text_w = HOW_TO_PLAY
            .iter()
            .flat_map(|(_, lines)| lines.iter())
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let x = w.saturating_sub(text_w) / 2;

        for (title, lines) in HOW_TO_PLAY {
            fb.put_str(x, y, title, CellStyle::new(WHITE, BG).bold());
            y += 1;
            for line in lines.iter() {
                fb.put_str(x, y, line, CellStyle::new(GREY, BG));
                y += 1;
            }
            y += 1;
        }
        fb.put_str_centered(0, w, y, "[Esc] back", CellStyle::new(GREY, BG).dim());
    }

    fn draw_game(&self, snap: &SessionSnapshot, fb: &mut FrameBuffer) {
        let w = fb.width();
        let h = fb.height();

        // Header
        fb.put_str(1, 0, "[Esc] menu", CellStyle::new(GREY, BG).dim());
        let header = format!("Score: {}  Best: {}", snap.score, snap.high_score);
        let hx = w.saturating_sub(header.chars().count() as u16 + 1);
        fb.put_str(hx, 0, &header, CellStyle::new(WHITE, BG).bold());

        let (Some(current), Some(next)) = (&snap.current_item, &snap.next_item) else {
            fb.put_str_centered(0, w, h / 2, "Loading...", CellStyle::new(GREY, BG));
            return;
        };

        let body_top = 1;
        let body_h = h.saturating_sub(body_top);
        let panel_h = body_h.saturating_sub(1) / 2;
        let vs_y = body_top + panel_h;
        let bottom_top = vs_y + 1;

        self.draw_panel(fb, body_top, panel_h);
        let cy = body_top + panel_h.saturating_sub(4) / 2;
        self.draw_item_revealed(fb, current, cy);

        fb.put_str_centered(0, w, vs_y, "( VS )", CellStyle::new(GOLD, BG).bold());

        self.draw_panel(fb, bottom_top, panel_h);
        let ny = bottom_top + panel_h.saturating_sub(4) / 2;
        fb.put_str_centered(0, w, ny, &next.keyword, CellStyle::new(WHITE, PANEL).bold());
        // After a wrong guess the lower item is a fresh draw nobody guessed on.
        if snap.is_game_over {
            return;
        }
        fb.put_str_centered(0, w, ny + 1, "has", CellStyle::new(GREY, PANEL));
        fb.put_str_centered(
            0,
            w,
            ny + 2,
            " ▲ HIGHER [Up] ",
            CellStyle::new(WHITE, GREEN).bold(),
        );
        fb.put_str_centered(
            0,
            w,
            ny + 3,
            " ▼ LOWER [Down] ",
            CellStyle::new(WHITE, RED).bold(),
        );
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, top: u16, h: u16) {
        let w = fb.width();
        let style = CellStyle::new(GREY, PANEL);
        fb.fill_rect(1, top, w.saturating_sub(2), h, ' ', style);
        fb.draw_box(1, top, w.saturating_sub(2), h, style.dim());
    }

    fn draw_item_revealed(&self, fb: &mut FrameBuffer, item: &Item, y: u16) {
        let w = fb.width();
        fb.put_str_centered(0, w, y, &item.keyword, CellStyle::new(WHITE, PANEL).bold());
        fb.put_str_centered(0, w, y + 1, "Has", CellStyle::new(GREY, PANEL));
        fb.put_str_centered(
            0,
            w,
            y + 2,
            &format_volume(item.search_volume),
            CellStyle::new(GOLD, PANEL).bold(),
        );
        fb.put_str_centered(0, w, y + 3, "searches monthly", CellStyle::new(GREY, PANEL));
    }

    fn draw_game_over(&self, snap: &SessionSnapshot, fb: &mut FrameBuffer) {
        let box_w = 36.min(fb.width());
        let box_h = 10.min(fb.height());
        let x = fb.width().saturating_sub(box_w) / 2;
        let y = fb.height().saturating_sub(box_h) / 2;

        let style = CellStyle::new(WHITE, BG);
        fb.fill_rect(x, y, box_w, box_h, ' ', style);
        fb.draw_box(x, y, box_w, box_h, CellStyle::new(GOLD, BG));

        fb.put_str_centered(x, box_w, y + 1, "GAME OVER", CellStyle::new(RED, BG).bold());
        fb.put_str_centered(x, box_w, y + 3, &format!("Score: {}", snap.final_score), style.bold());
        fb.put_str_centered(
            x,
            box_w,
            y + 4,
            &format!("Highest score: {}", snap.high_score),
            CellStyle::new(GREY, BG),
        );
        if snap.new_high_score {
            fb.put_str_centered(x, box_w, y + 5, "New High Score!", CellStyle::new(GOLD, BG).bold());
        }
        fb.put_str_centered(x, box_w, y + 7, "[Enter] PLAY AGAIN", CellStyle::new(WHITE, GREEN).bold());
        fb.put_str_centered(x, box_w, y + 8, "[Esc] BACK TO MENU", CellStyle::new(GREY, BG));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    fn playing() -> SessionSnapshot {
        SessionSnapshot {
            phase: Phase::InRound,
            score: 3,
            high_score: 7,
            current_item: Some(Item::new(1, "Coffee", 2_740_000)),
            next_item: Some(Item::new(2, "Tea", 1_220_000)),
            ..SessionSnapshot::default()
        }
    }

    #[test]
    fn game_screen_hides_next_volume_while_playing() {
        let fb = GameView::new().render(Screen::Game, &playing(), Viewport::new(60, 24));
        assert!(fb.contains_text("Score: 3  Best: 7"));
        assert!(fb.contains_text("Coffee"));
        assert!(fb.contains_text("2,740,000"));
        assert!(fb.contains_text("Tea"));
        assert!(!fb.contains_text("1,220,000"));
    }

    #[test]
    fn game_over_overlay() {
        let snap = SessionSnapshot {
            phase: Phase::GameOver,
            is_game_over: true,
            score: 0,
            final_score: 7,
            new_high_score: true,
            ..playing()
        };
        let fb = GameView::new().render(Screen::Game, &snap, Viewport::new(60, 24));
        assert!(fb.contains_text("GAME OVER"));
        assert!(fb.contains_text("Score: 7"));
        assert!(fb.contains_text("Highest score: 7"));
        assert!(fb.contains_text("New High Score!"));
        assert!(!fb.contains_text("1,220,000"));
        assert!(!fb.contains_text("HIGHER [Up]"));
        assert!(!fb.contains_text("LOWER [Down]"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::new();
        for (w, h) in [(0, 0), (1, 1), (5, 3), (12, 6)] {
            for screen in [Screen::Home, Screen::HowToPlay, Screen::Game] {
                let _ = view.render(screen, &playing(), Viewport::new(w, h));
            }
        }
    }
}
