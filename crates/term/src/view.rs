//! QuizView: maps a [`Screen`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). Every frame also produces a [`Layout`], the
//! hit-test map the input adapters use until the next frame is drawn.

use crate::fb::{text_width, wrap_text, CellStyle, FrameBuffer, Rgb};
use crate::input::{Command, Element, HitTest, Regions};
use crate::screen::{Screen, ScreenMode};
use crate::types::{ConfirmAction, FragmentId, Point, QuizIntent, Rect, SlotPosition};

const BG: Rgb = Rgb::new(11, 15, 25);
const PANEL: Rgb = Rgb::new(18, 26, 40);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const MUTED: Rgb = Rgb::new(110, 120, 140);
const ACCENT: Rgb = Rgb::new(20, 255, 236);
const TEAL: Rgb = Rgb::new(13, 115, 119);
const DANGER: Rgb = Rgb::new(255, 65, 108);

const BASE: CellStyle = CellStyle::new(TEXT, BG);
const TITLE: CellStyle = CellStyle::new(BG, ACCENT).bold();
const HEADLINE: CellStyle = CellStyle::new(ACCENT, BG).bold();
const HINT: CellStyle = CellStyle::new(MUTED, BG).dim();
const SLOT: CellStyle = CellStyle::new(TEAL, BG);
const SLOT_MISMATCH: CellStyle = CellStyle::new(DANGER, BG).bold();
const PLACEHOLDER: CellStyle = CellStyle::new(MUTED, BG);
const POOL_BORDER: CellStyle = CellStyle::new(MUTED, BG);
const CHIP: CellStyle = CellStyle::new(ACCENT, PANEL);
const CHIP_GHOST: CellStyle = CellStyle::new(MUTED, BG).dim();
const CHIP_HELD: CellStyle = CellStyle::new(BG, ACCENT).bold();
const BUTTON: CellStyle = CellStyle::new(BG, ACCENT).bold();
const BUTTON_DANGER: CellStyle = CellStyle::new(TEXT, DANGER).bold();
const ERROR: CellStyle = CellStyle::new(DANGER, BG).bold();
const MODAL: CellStyle = CellStyle::new(ACCENT, PANEL);

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

/// Where everything landed in the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    regions: Regions,
}

impl Layout {
    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    pub fn rect_of(&self, element: Element) -> Option<Rect> {
        self.regions.rect_of(element)
    }

    /// A point inside `element`.
    pub fn center_of(&self, element: Element) -> Option<Point> {
        self.rect_of(element)
            .map(|r| Point::new(r.x + r.width / 2, r.y + r.height / 2))
    }

    fn push(&mut self, rect: Rect, element: Element) {
        self.regions.push(rect, element);
    }
}

impl HitTest for Layout {
    fn element_at(&self, p: Point, transparent: Option<FragmentId>) -> Option<Element> {
        self.regions.element_at(p, transparent)
    }

    fn fragment_rect(&self, fragment: FragmentId) -> Option<Rect> {
        self.regions.fragment_rect(fragment)
    }

    fn slot_of(&self, fragment: FragmentId) -> Option<SlotPosition> {
        self.regions.slot_of(fragment)
    }
}

#[derive(Debug, Clone, Copy)]
struct Column {
    x: u16,
    width: u16,
}

/// Draws the quiz pages.
pub struct QuizView {
    /// Content column width cap; the column is centered in wider terminals.
    max_width: u16,
}

impl Default for QuizView {
    fn default() -> Self {
        Self { max_width: 76 }
    }
}

impl QuizView {
    pub fn new(max_width: u16) -> Self {
        Self {
            max_width: max_width.max(20),
        }
    }

    /// Render the screen into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, screen: &Screen, viewport: Viewport, fb: &mut FrameBuffer) -> Layout {
        fb.resize(viewport.width, viewport.height);
        fb.clear(BASE.into_cell(' '));

        let mut layout = Layout::default();
        let width = viewport.width.min(self.max_width);
        let col = Column {
            x: (viewport.width - width) / 2,
            width,
        };

        self.draw_title_bar(fb, screen, viewport, col);
        match screen.mode {
            ScreenMode::Blank => {}
            ScreenMode::Start => self.draw_start(fb, &mut layout, screen, viewport, col),
            ScreenMode::Question => self.draw_question(fb, &mut layout, screen, col),
            ScreenMode::Result => self.draw_result(fb, &mut layout, screen, viewport, col),
            ScreenMode::Goodbye => self.draw_goodbye(fb, &mut layout, viewport, col),
            ScreenMode::Fatal => self.draw_fatal(fb, &mut layout, screen, viewport, col),
        }
        if let Some(action) = screen.confirm {
            self.draw_confirm(fb, &mut layout, action, viewport);
        }
        self.draw_hints(fb, screen, viewport, col);

        layout.regions.set_slot_occupants(&screen.slots);
        layout
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: &Screen, viewport: Viewport) -> (FrameBuffer, Layout) {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let layout = self.render_into(screen, viewport, &mut fb);
        (fb, layout)
    }

    fn draw_title_bar(&self, fb: &mut FrameBuffer, screen: &Screen, viewport: Viewport, col: Column) {
        fb.fill_rect(0, 0, viewport.width, 1, ' ', TITLE);
        fb.put_str_clipped(col.x, 0, " DRAG QUIZ", col.width, TITLE);

        if screen.mode == ScreenMode::Question {
            let progress = format!("Question {} / {}", screen.number, screen.total);
            fb.put_str_centered(col.x, 0, col.width, &progress, TITLE);
            let timer = format!("{} ", screen.timer_line());
            let x = col.x + col.width.saturating_sub(text_width(&timer));
            fb.put_str(x, 0, &timer, TITLE);
        }
    }

    fn draw_hints(&self, fb: &mut FrameBuffer, screen: &Screen, viewport: Viewport, col: Column) {
        if viewport.height < 4 {
            return;
        }
        let hint = if screen.confirm.is_some() {
            "y yes · n no"
        } else {
            match screen.mode {
                ScreenMode::Blank => return,
                ScreenMode::Start => "s start · q quit",
                ScreenMode::Question => "drag answers into the slots · Esc drop · q quit",
                ScreenMode::Result => "r retry · c cancel · q quit",
                ScreenMode::Goodbye => "r restart · q exit",
                ScreenMode::Fatal => "q exit",
            }
        };
        fb.put_str_centered(col.x, viewport.height - 1, col.width, hint, HINT);
    }

    fn draw_start(
        &self,
        fb: &mut FrameBuffer,
        layout: &mut Layout,
        screen: &Screen,
        viewport: Viewport,
        col: Column,
    ) {
        let y = (viewport.height / 2).saturating_sub(3).max(2);
        fb.put_str_centered(col.x, y, col.width, "Ready to code? Have fun!", HEADLINE);
        if let Some(notice) = &screen.notice {
            fb.put_str_centered(col.x, y + 2, col.width, notice, ERROR);
        }
        draw_buttons(
            fb,
            layout,
            col,
            y + 4,
            &[
                ("Start", Command::Intent(QuizIntent::Start), false),
                ("Quit", Command::Intent(QuizIntent::Quit), true),
            ],
        );
    }

    fn draw_question(&self, fb: &mut FrameBuffer, layout: &mut Layout, screen: &Screen, col: Column) {
        let held = screen.drag.map(|(fragment, _)| fragment);
        let inner = col.width.saturating_sub(4);

        let mut y = 2u16;
        for line in wrap_text(&screen.question, col.width) {
            fb.put_str(col.x, y, &line, HEADLINE);
            y += 1;
        }
        y += 1;

        let border = if screen.mismatch { SLOT_MISMATCH } else { SLOT };
        for (pos, occupant) in screen.slots.iter().enumerate() {
            fb.draw_box(col.x, y, col.width, 3, border);
            layout.push(rect(col.x, y, col.width, 3), Element::Slot(pos));
            match *occupant {
                Some(fragment) => {
                    draw_chip(fb, layout, screen, fragment, col.x + 2, y + 1, inner, held);
                }
                None => {
                    let prompt = format!("Drop answer {} here", pos + 1);
                    fb.put_str_clipped(col.x + 2, y + 1, &prompt, inner, PLACEHOLDER);
                }
            }
            y += 3;
        }
        y += 1;

        fb.put_str(col.x, y, "Answers", HINT);
        y += 1;
        let rows = flow_rows(screen, inner);
        let box_h = rows.len().max(1) as u16 + 2;
        fb.draw_box(col.x, y, col.width, box_h, POOL_BORDER);
        layout.push(rect(col.x, y, col.width, box_h), Element::Pool);
        for (i, row) in rows.iter().enumerate() {
            let mut x = col.x + 2;
            for &fragment in row {
                let w = draw_chip(fb, layout, screen, fragment, x, y + 1 + i as u16, inner, held);
                x += w + 1;
            }
        }
        y += box_h + 1;

        draw_buttons(
            fb,
            layout,
            col,
            y,
            &[("Quit", Command::Intent(QuizIntent::Quit), true)],
        );

        // The held fragment is drawn last so it sits on top of everything.
        if let Some((fragment, at)) = screen.drag {
            let text = chip_label(screen.fragment_text(fragment));
            let w = text_width(&text).min(inner.max(1));
            let x = at.x.max(0).min(i32::from(u16::MAX)) as u16;
            let y = at.y.max(0).min(i32::from(u16::MAX)) as u16;
            fb.put_str_clipped(x, y, &text, w, CHIP_HELD);
            layout.push(rect(x, y, w, 1), Element::Fragment(fragment));
        }
    }

    fn draw_result(
        &self,
        fb: &mut FrameBuffer,
        layout: &mut Layout,
        screen: &Screen,
        viewport: Viewport,
        col: Column,
    ) {
        let Some(result) = screen.result else {
            return;
        };
        let y = (viewport.height / 2).saturating_sub(4).max(2);
        fb.put_str_centered(col.x, y, col.width, "Quiz Complete!", HEADLINE);
        fb.put_str_centered(col.x, y + 2, col.width, &result.score_line(), BASE.bold());
        fb.put_str_centered(col.x, y + 3, col.width, &result.time_line(), BASE);
        draw_buttons(
            fb,
            layout,
            col,
            y + 5,
            &[
                ("Retry", Command::Intent(QuizIntent::Retry), false),
                ("Cancel", Command::Intent(QuizIntent::Cancel), false),
                ("Quit", Command::Intent(QuizIntent::Quit), true),
            ],
        );
    }

    fn draw_goodbye(&self, fb: &mut FrameBuffer, layout: &mut Layout, viewport: Viewport, col: Column) {
        let y = (viewport.height / 2).saturating_sub(3).max(2);
        fb.put_str_centered(col.x, y, col.width, "Thanks for playing!", HEADLINE);
        fb.put_str_centered(col.x, y + 1, col.width, "Come back soon!", BASE);
        draw_buttons(
            fb,
            layout,
            col,
            y + 3,
            &[("Restart", Command::Intent(QuizIntent::Restart), false)],
        );
    }

    fn draw_fatal(
        &self,
        fb: &mut FrameBuffer,
        layout: &mut Layout,
        screen: &Screen,
        viewport: Viewport,
        col: Column,
    ) {
        let message = screen.fatal.as_deref().unwrap_or("Error");
        let mut y = (viewport.height / 2).saturating_sub(3).max(2);
        for line in wrap_text(message, col.width) {
            fb.put_str_centered(col.x, y, col.width, &line, ERROR);
            y += 1;
        }
        draw_buttons(fb, layout, col, y + 1, &[("Exit", Command::Exit, true)]);
    }

    fn draw_confirm(
        &self,
        fb: &mut FrameBuffer,
        layout: &mut Layout,
        action: ConfirmAction,
        viewport: Viewport,
    ) {
        let message = action.message();
        let w = (text_width(message) + 6).max(24).min(viewport.width);
        let h = 5;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        fb.fill_rect(x, y, w, h, ' ', MODAL);
        fb.draw_box(x, y, w, h, MODAL.bold());
        fb.put_str_centered(x, y + 1, w, message, MODAL.bold());
        draw_buttons(
            fb,
            layout,
            Column { x, width: w },
            y + 3,
            &[
                ("Yes", Command::Confirm(true), false),
                ("No", Command::Confirm(false), true),
            ],
        );
    }
}

fn rect(x: u16, y: u16, w: u16, h: u16) -> Rect {
    Rect::new(x.into(), y.into(), w.into(), h.into())
}

fn chip_label(text: &str) -> String {
    format!("[ {text} ]")
}

/// Draw one fragment chip; a held fragment leaves a ghost behind and is not hit-testable there.
#[allow(clippy::too_many_arguments)]
fn draw_chip(
    fb: &mut FrameBuffer,
    layout: &mut Layout,
    screen: &Screen,
    fragment: FragmentId,
    x: u16,
    y: u16,
    max_w: u16,
    held: Option<FragmentId>,
) -> u16 {
    let text = chip_label(screen.fragment_text(fragment));
    let w = text_width(&text).min(max_w);
    if held == Some(fragment) {
        fb.put_str_clipped(x, y, &text, max_w, CHIP_GHOST);
    } else {
        fb.put_str_clipped(x, y, &text, max_w, CHIP);
        layout.push(rect(x, y, w, 1), Element::Fragment(fragment));
    }
    w
}

/// Pool chips flowed left to right, wrapping at `width`.
fn flow_rows(screen: &Screen, width: u16) -> Vec<Vec<FragmentId>> {
    let mut rows: Vec<Vec<FragmentId>> = Vec::new();
    let mut used = 0u16;
    for &fragment in &screen.pool {
        let w = (text_width(screen.fragment_text(fragment)) + 4).min(width);
        match rows.last_mut() {
            Some(row) if used + 1 + w <= width => {
                row.push(fragment);
                used += 1 + w;
            }
            _ => {
                rows.push(vec![fragment]);
                used = w;
            }
        }
    }
    rows
}

fn draw_buttons(
    fb: &mut FrameBuffer,
    layout: &mut Layout,
    col: Column,
    y: u16,
    buttons: &[(&str, Command, bool)],
) {
    let labels: Vec<String> = buttons.iter().map(|(label, _, _)| chip_label(label)).collect();
    let gap = 2u16;
    let total = labels.iter().map(|l| text_width(l)).sum::<u16>()
        + gap * (labels.len().saturating_sub(1) as u16);

    let mut x = col.x + col.width.saturating_sub(total) / 2;
    for (label, &(_, command, danger)) in labels.iter().zip(buttons) {
        let style = if danger { BUTTON_DANGER } else { BUTTON };
        let w = text_width(label);
        fb.put_str(x, y, label, style);
        layout.push(rect(x, y, w, 1), Element::Control(command));
        x += w + gap;
    }
}
