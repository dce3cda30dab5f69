//! Terminal rendering of a vertical stepper.
//!
//! Steps are laid out top to bottom into an off-screen buffer as tall as the
//! whole stepper, then the visible window is copied into the frame. The
//! window position is driven by scroll requests from the stepper and by
//! keyboard focus.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Widget},
    Frame,
};
use tui_textarea::TextArea;

use super::theme::{self, IDLE_COLOR};
use crate::stepper::{
    BodyPresence, ScrollBehavior, ScrollBlock, ScrollRequest, StepAttributes, StepLayout,
    StepStyles, VerticalStepper,
};

/// Columns used by the focus marker
const MARKER_WIDTH: u16 = 2;
/// Column where labels, descriptions and indented content start
const LABEL_COLUMN: u16 = MARKER_WIDTH + 4;

/// Per-body state: a scratch notes editor that lives while the body is open
#[derive(Debug, Default)]
pub struct StepNotes {
    pub editor: TextArea<'static>,
}

/// Row span of one step in the off-screen buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRows {
    pub top: usize,
    pub header: usize,
    pub content: usize,
    pub spacer: usize,
}

impl StepRows {
    pub fn content_top(&self) -> usize {
        self.top + self.header
    }

    pub fn height(&self) -> usize {
        self.header + self.content + self.spacer
    }

    pub fn end(&self) -> usize {
        self.top + self.height()
    }
}

/// Inputs the view needs besides the stepper itself
pub struct ViewProps<'a> {
    pub bodies: &'a [String],
    pub focus: usize,
    pub editing: bool,
    pub notes_height: u16,
}

#[derive(Debug, Clone, Copy)]
enum PendingScroll {
    Content(ScrollRequest),
    Reveal(usize),
}

#[derive(Debug, Default)]
pub struct StepperView {
    offset: usize,
    target: Option<usize>,
    pending: Option<PendingScroll>,
    rows: Vec<StepRows>,
    viewport: Rect,
    spinner_frame: usize,
}

impl StepperView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn rows(&self) -> &[StepRows] {
        &self.rows
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Honor a scroll-into-view request on the next render
    pub fn scroll_to(&mut self, request: ScrollRequest) {
        self.pending = Some(PendingScroll::Content(request));
    }

    /// Make a step visible, moving as little as possible
    pub fn reveal(&mut self, index: usize) {
        if self.pending.is_none() && self.target.is_none() {
            self.pending = Some(PendingScroll::Reveal(index));
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.target = None;
        self.offset = self.offset.saturating_add_signed(delta);
    }

    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    /// Step under a terminal cell, using the layout of the last render
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        if !self.viewport.contains(Position::new(column, row)) {
            return None;
        }
        let virtual_row = usize::from(row - self.viewport.y) + self.offset;
        self.rows
            .iter()
            .position(|rows| virtual_row >= rows.top && virtual_row < rows.end())
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        stepper: &mut VerticalStepper<StepNotes>,
        props: &ViewProps<'_>,
    ) {
        self.viewport = area;
        if area.is_empty() {
            return;
        }
        let attrs = stepper.attributes();
        self.rows = measure(stepper, &attrs, props);

        let total = self.rows.last().map_or(0, StepRows::end);
        let viewport = usize::from(area.height);
        self.apply_scroll(viewport, total);

        let width = area.width.saturating_sub(1);
        let mut canvas = Buffer::empty(Rect::new(0, 0, width, clamp_u16(total)));

        let labels: Vec<(String, Option<String>)> = stepper
            .context()
            .steps()
            .iter()
            .map(|s| (s.label.clone(), s.description.clone()))
            .collect();
        let styles = stepper.context().options.styles.clone();
        let last = attrs.len().saturating_sub(1);

        for (index, step_attrs) in attrs.iter().enumerate() {
            let rows = self.rows[index];
            let (label, description) = &labels[index];
            let header = StepHeader {
                label,
                description: description.as_deref(),
                attrs: step_attrs,
                rows,
                is_last: index == last,
                focused: index == props.focus,
                spinner_frame: self.spinner_frame,
            };
            header.render(&mut canvas, width, &styles);

            let editing = props.editing && index == props.focus;
            let body_text = props.bodies.get(index).map_or("", String::as_str);
            if let Some(notes) = stepper.body_mut(index).and_then(|b| b.state_mut()) {
                render_body(
                    &mut canvas,
                    content_rect(step_attrs, rows, width),
                    body_text,
                    notes,
                    editing,
                    &styles,
                );
            }
        }

        blit(&canvas, frame.buffer_mut(), area, self.offset, total);

        if total > viewport && area.width > 0 {
            let mut state = ScrollbarState::new(total - viewport).position(self.offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut state,
            );
        }
    }

    fn apply_scroll(&mut self, viewport: usize, total: usize) {
        let max = total.saturating_sub(viewport);

        match self.pending.take() {
            Some(PendingScroll::Content(request)) => {
                if let Some(rows) = self.rows.get(request.index) {
                    let target = request
                        .block
                        .offset_for(rows.content_top(), rows.content, viewport, self.offset)
                        .min(max);
                    match request.behavior {
                        ScrollBehavior::Auto => {
                            self.offset = target;
                            self.target = None;
                        }
                        ScrollBehavior::Smooth => self.target = Some(target),
                    }
                }
            }
            Some(PendingScroll::Reveal(index)) => {
                if let Some(rows) = self.rows.get(index) {
                    self.offset = ScrollBlock::Nearest
                        .offset_for(rows.top, rows.height(), viewport, self.offset)
                        .min(max);
                }
            }
            None => {}
        }

        if let Some(target) = self.target {
            let distance = target.abs_diff(self.offset);
            let stride = distance.div_ceil(3).max(1);
            if target > self.offset {
                self.offset = (self.offset + stride).min(target);
            } else {
                self.offset = self.offset.saturating_sub(stride).max(target);
            }
            if self.offset == target {
                self.target = None;
            }
        }

        self.offset = self.offset.min(max);
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn body_line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.lines().count()
    }
}

/// Row spans for every step given its current attributes and body state
fn measure(
    stepper: &VerticalStepper<StepNotes>,
    attrs: &[StepAttributes],
    props: &ViewProps<'_>,
) -> Vec<StepRows> {
    let last = attrs.len().saturating_sub(1);
    let mut top = 0;

    attrs
        .iter()
        .enumerate()
        .map(|(index, step_attrs)| {
            let has_description = stepper
                .context()
                .step(index)
                .is_some_and(|s| s.description.is_some());
            let expanded = stepper
                .body(index)
                .is_some_and(|b| b.presence() == BodyPresence::Expanded);

            let content = if expanded {
                let text = props.bodies.get(index).map_or("", String::as_str);
                body_line_count(text) + usize::from(props.notes_height) + 2
            } else {
                usize::from(step_attrs.content_min_height)
            };
            let spacer = usize::from(step_attrs.layout == StepLayout::Circle && index != last);

            let rows = StepRows {
                top,
                header: 1 + usize::from(has_description),
                content,
                spacer,
            };
            top = rows.end();
            rows
        })
        .collect()
}

fn content_rect(attrs: &StepAttributes, rows: StepRows, width: u16) -> Rect {
    let x = if attrs.content_indented {
        LABEL_COLUMN
    } else {
        MARKER_WIDTH + 2
    };
    Rect::new(
        x,
        clamp_u16(rows.content_top()),
        width.saturating_sub(x),
        clamp_u16(rows.content),
    )
}

struct StepHeader<'a> {
    label: &'a str,
    description: Option<&'a str>,
    attrs: &'a StepAttributes,
    rows: StepRows,
    is_last: bool,
    focused: bool,
    spinner_frame: usize,
}

impl StepHeader<'_> {
    fn render(&self, buf: &mut Buffer, width: u16, styles: &StepStyles) {
        let attrs = self.attrs;
        let top = clamp_u16(self.rows.top);
        let step_area = Rect::new(0, top, width, clamp_u16(self.rows.height()));
        buf.set_style(step_area, theme::slot_style(&styles.vertical_step));
        let header_area = Rect::new(0, top, width, clamp_u16(self.rows.header));
        buf.set_style(header_area, theme::slot_style(&styles.vertical_step_container));

        if self.focused {
            let marker_color = if attrs.clickable {
                Color::Yellow
            } else {
                IDLE_COLOR
            };
            buf.set_string(0, top, "›", Style::default().fg(marker_color));
        }

        let glyph = theme::icon_glyph(&attrs.icon, self.spinner_frame);
        let icon_style = Style::default().fg(theme::state_color(attrs));
        match attrs.layout {
            StepLayout::Circle => {
                buf.set_string(MARKER_WIDTH, top, format!("({glyph})"), icon_style);
                if !self.is_last {
                    let connector = Style::default().fg(theme::connector_color(attrs));
                    for y in (self.rows.top + 1)..self.rows.end() {
                        buf.set_string(MARKER_WIDTH + 1, clamp_u16(y), "│", connector);
                    }
                }
            }
            StepLayout::Line => {
                let border_color = if attrs.active {
                    theme::COMPLETED_COLOR
                } else {
                    IDLE_COLOR
                };
                for y in self.rows.top..self.rows.content_top() {
                    buf.set_string(MARKER_WIDTH, clamp_u16(y), "┃", Style::default().fg(border_color));
                }
                buf.set_string(MARKER_WIDTH + 2, top, glyph, icon_style);
            }
        }

        let mut label_style = theme::label_style(attrs);
        if self.focused && attrs.clickable {
            label_style = label_style.add_modifier(Modifier::UNDERLINED);
        }
        let mut spans = vec![Span::styled(self.label.to_string(), label_style)];
        if attrs.optional {
            spans.push(Span::styled(
                " (optional)",
                Style::default()
                    .fg(IDLE_COLOR)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        let label_width = width.saturating_sub(LABEL_COLUMN);
        buf.set_line(LABEL_COLUMN, top, &Line::from(spans), label_width);

        if let Some(description) = self.description {
            let mut style = Style::default().fg(Color::Gray);
            if attrs.label_opacity < 1.0 {
                style = style.add_modifier(Modifier::DIM);
            }
            buf.set_stringn(LABEL_COLUMN, top + 1, description, usize::from(label_width), style);
        }
    }
}

fn render_body(
    buf: &mut Buffer,
    area: Rect,
    text: &str,
    notes: &mut StepNotes,
    editing: bool,
    styles: &StepStyles,
) {
    buf.set_style(area, theme::slot_style(&styles.vertical_step_content));

    let text_rows = clamp_u16(body_line_count(text)).min(area.height);
    if text_rows > 0 {
        let text_area = Rect::new(area.x, area.y, area.width, text_rows);
        Paragraph::new(text.to_string())
            .style(Style::default().fg(Color::Gray))
            .render(text_area, buf);
    }

    let notes_area = Rect::new(
        area.x,
        area.y + text_rows,
        area.width,
        area.height - text_rows,
    );
    let border_color = if editing { Color::Yellow } else { IDLE_COLOR };
    let editor = &mut notes.editor;
    editor.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Notes ")
            .border_style(Style::default().fg(border_color)),
    );
    editor.set_cursor_line_style(Style::default());
    editor.set_cursor_style(if editing {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });
    if !editing && editor.lines().iter().all(String::is_empty) {
        editor.set_placeholder_text("press i to take notes");
        editor.set_placeholder_style(Style::default().fg(IDLE_COLOR));
    }
    (&*editor).render(notes_area, buf);
}

/// Copy the visible rows of the off-screen canvas into the frame
fn blit(canvas: &Buffer, target: &mut Buffer, area: Rect, offset: usize, total: usize) {
    for row in 0..area.height {
        let source_row = offset + usize::from(row);
        if source_row >= total {
            break;
        }
        let source_y = clamp_u16(source_row);
        for column in 0..canvas.area.width.min(area.width) {
            if let (Some(source), Some(cell)) = (
                canvas.cell((column, source_y)),
                target.cell_mut((area.x + column, area.y + row)),
            ) {
                *cell = source.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stepper::{StepDescriptor, StepperContext, StepperOptions, Variant};
    use ratatui::{backend::TestBackend, Terminal};

    fn stepper(options: StepperOptions) -> VerticalStepper<StepNotes> {
        let steps = vec![
            StepDescriptor::new("Account").with_description("Create your login"),
            StepDescriptor::new("Profile"),
            StepDescriptor::new("Review").with_optional(true),
        ];
        VerticalStepper::new(StepperContext::new(steps, options))
    }

    fn bodies() -> Vec<String> {
        vec![
            "Pick a username.".to_string(),
            "Name and team.".to_string(),
            String::new(),
        ]
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    fn draw(
        terminal: &mut Terminal<TestBackend>,
        view: &mut StepperView,
        stepper: &mut VerticalStepper<StepNotes>,
        bodies: &[String],
    ) {
        terminal
            .draw(|frame| {
                let props = ViewProps {
                    bodies,
                    focus: 0,
                    editing: false,
                    notes_height: 1,
                };
                view.render(frame, frame.area(), stepper, &props);
            })
            .unwrap();
    }

    #[test]
    fn test_measure_circle_layout() {
        let mut stepper = stepper(StepperOptions::default());
        let mut view = StepperView::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 30)).unwrap();
        draw(&mut terminal, &mut view, &mut stepper, &bodies());

        let rows = view.rows();
        // header + description, body text + 3-row notes, spacer
        assert_eq!(rows[0], StepRows { top: 0, header: 2, content: 4, spacer: 1 });
        assert_eq!(rows[1], StepRows { top: 7, header: 1, content: 1, spacer: 1 });
        assert_eq!(rows[2], StepRows { top: 10, header: 1, content: 1, spacer: 0 });
    }

    #[test]
    fn test_line_layout_has_no_spacers_or_min_height() {
        let mut stepper = stepper(StepperOptions {
            variant: Variant::Line,
            ..StepperOptions::default()
        });
        let mut view = StepperView::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 30)).unwrap();
        draw(&mut terminal, &mut view, &mut stepper, &bodies());

        let rows = view.rows();
        assert_eq!(rows[1], StepRows { top: 6, header: 1, content: 0, spacer: 0 });
    }

    #[test]
    fn test_renders_labels_and_icons() {
        let mut stepper = stepper(StepperOptions::default());
        stepper.set_step(1);
        let mut view = StepperView::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 30)).unwrap();
        draw(&mut terminal, &mut view, &mut stepper, &bodies());

        let text = screen_text(&terminal).join("\n");
        assert!(text.contains("(✓) Account"));
        assert!(text.contains("(2) Profile"));
        assert!(text.contains("Review (optional)"));
        assert!(text.contains("Name and team."));
        assert!(!text.contains("Pick a username."));
    }

    #[test]
    fn test_hit_test_maps_rows_to_steps() {
        let mut stepper = stepper(StepperOptions::default());
        let mut view = StepperView::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 30)).unwrap();
        draw(&mut terminal, &mut view, &mut stepper, &bodies());

        assert_eq!(view.hit_test(5, 0), Some(0));
        assert_eq!(view.hit_test(5, 7), Some(1));
        assert_eq!(view.hit_test(5, 10), Some(2));
        assert_eq!(view.hit_test(5, 25), None);
    }

    #[test]
    fn test_smooth_scroll_reaches_center_target() {
        let mut stepper = stepper(StepperOptions {
            expand_vertical_steps: true,
            ..StepperOptions::default()
        });
        let tall: Vec<String> = (0..3).map(|_| "line\n".repeat(8)).collect();
        let mut view = StepperView::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        draw(&mut terminal, &mut view, &mut stepper, &tall);

        view.scroll_to(ScrollRequest::on_mount(2));
        draw(&mut terminal, &mut view, &mut stepper, &tall);
        assert!(view.is_animating() || view.offset() > 0);

        for _ in 0..20 {
            draw(&mut terminal, &mut view, &mut stepper, &tall);
        }
        assert!(!view.is_animating());
        let rows = view.rows()[2];
        let expected = ScrollBlock::Center.offset_for(rows.content_top(), rows.content, 10, 0);
        let max = rows.end() - 10;
        assert_eq!(view.offset(), expected.min(max));
    }

    #[test]
    fn test_zero_width_area_with_overflow_renders_nothing() {
        let mut stepper = stepper(StepperOptions {
            expand_vertical_steps: true,
            ..StepperOptions::default()
        });
        let tall: Vec<String> = (0..3).map(|_| "line\n".repeat(8)).collect();
        let mut view = StepperView::new();
        let mut terminal = Terminal::new(TestBackend::new(0, 4)).unwrap();
        draw(&mut terminal, &mut view, &mut stepper, &tall);

        assert_eq!(view.hit_test(0, 0), None);
        assert_eq!(view.offset(), 0);
    }

    #[test]
    fn test_one_column_area_with_overflow() {
        let mut stepper = stepper(StepperOptions {
            expand_vertical_steps: true,
            ..StepperOptions::default()
        });
        let tall: Vec<String> = (0..3).map(|_| "line\n".repeat(8)).collect();
        let mut view = StepperView::new();
        let mut terminal = Terminal::new(TestBackend::new(1, 4)).unwrap();
        draw(&mut terminal, &mut view, &mut stepper, &tall);

        assert!(view.rows().last().is_some_and(|r| r.end() > 4));
    }

    #[test]
    fn test_auto_scroll_jumps_immediately() {
        let mut stepper = stepper(StepperOptions {
            expand_vertical_steps: true,
            ..StepperOptions::default()
        });
        let tall: Vec<String> = (0..3).map(|_| "line\n".repeat(8)).collect();
        let mut view = StepperView::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        draw(&mut terminal, &mut view, &mut stepper, &tall);

        view.scroll_to(ScrollRequest {
            index: 1,
            behavior: ScrollBehavior::Auto,
            block: ScrollBlock::Start,
        });
        draw(&mut terminal, &mut view, &mut stepper, &tall);
        assert_eq!(view.offset(), view.rows()[1].content_top());
        assert!(!view.is_animating());
    }
}
