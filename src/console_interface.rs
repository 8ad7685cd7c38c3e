use crate::controller::EngineHandle;
use crate::core::{Direction, Tile, UserAction, Vec2};
use crate::editor::{EditorItem, StageEditor, Tool};
use crate::models::{EditorRenderState, GameRenderState};
use crate::stage::{Stage, StageDescriptor};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

/// Builds a descriptor from an ASCII map. The first line is the top row, so
/// it gets the highest `y`.
///
/// Tiles: '#' border, '@' human, '$' box, '.' goal, ' ' floor.
pub fn parse_level(s: &str) -> StageDescriptor {
    let lines: Vec<&str> = s
        .lines()
        .map(|line| line.trim_matches('\n'))
        .filter(|line| !line.is_empty())
        .collect();
    let height = lines.len() as i32;
    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as i32;

    let mut borders = Vec::new();
    let mut boxes = Vec::new();
    let mut goals = Vec::new();
    let mut human = None;

    for (row, line) in lines.iter().enumerate() {
        let y = stage_y(row as i32, height);
        for (x, ch) in line.chars().enumerate() {
            let pos = Vec2 { x: x as i32, y };
            match ch {
                '#' => borders.push(pos),
                '.' => goals.push(pos),
                '$' => boxes.push(pos),
                '@' => human = Some(pos),
                _ => {}
            }
        }
    }

    StageDescriptor::from_cells(width, height, 1, &borders, &boxes, &goals, human)
}

/// Stage `y` for screen `row`. Stage `y` grows upward, screen rows downward.
pub fn stage_y(row: i32, height: i32) -> i32 {
    height - 1 - row
}

pub fn render_game_to_string(engine: &EngineHandle) -> String {
    let state = engine.entity_state();
    render_stage_to_string(engine.stage(), state.human, &state.boxes)
}

pub fn render_stage_to_string(stage: &Stage, human: Vec2, boxes: &[Vec2]) -> String {
    let mut result = String::new();
    for row in 0..stage.height() {
        let y = stage_y(row, stage.height());
        for x in 0..stage.width() {
            let pos = Vec2 { x, y };
            let has_player = pos == human;
            let has_box = boxes.contains(&pos);
            let ch = match stage.tile(pos).unwrap_or(Tile::Border) {
                Tile::Border => '#',
                Tile::Floor => if has_player { '@' } else if has_box { '$' } else { ' ' },
                Tile::Goal => if has_player { '+' } else if has_box { '*' } else { '.' },
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

fn editor_glyph(item: Option<EditorItem>) -> char {
    match item {
        Some(EditorItem::Border) => '#',
        Some(EditorItem::Box) => '$',
        Some(EditorItem::Goal) => '.',
        Some(EditorItem::Human) => '@',
        None => ' ',
    }
}

pub fn render_editor_to_string(editor: &StageEditor) -> String {
    let mut result = String::new();
    for row in 0..editor.height() {
        let y = stage_y(row, editor.height());
        for x in 0..editor.width() {
            result.push(editor_glyph(editor.item_at(Vec2 { x, y })));
        }
        result.push('\n');
    }
    result
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn status_line(state: &GameRenderState) -> String {
    let game = &state.game;
    let mut status = format!(
        "Moves: {} | Step: {} | Time: {} | On goal: {}/{}",
        game.moves_made,
        game.move_count,
        format_elapsed(state.elapsed),
        game.active_box_indices.len(),
        game.boxes.len(),
    );
    if let Some(update) = &state.last_update {
        status = format!("{} | Last: {:?}", status, update);
    }
    if let Some(err) = &state.error {
        status = format!("{} | Error: {}", status, err);
    }
    status
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &EngineHandle,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)])
            .split(f.area());

        let game_text = render_game_to_string(engine);
        let title = if state.game.solved { "Sokoban - Stage clear!" } else { "Sokoban" };
        let game_paragraph = Paragraph::new(game_text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(if state.game.solved { Color::Green } else { Color::White }))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[0]);

        let status_paragraph = Paragraph::new(status_line(state))
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(status_paragraph, chunks[1]);

        let instruction_paragraph =
            Paragraph::new("WASD/Arrows move, U/Z undo, Y redo, R restart, Q quit")
                .block(Block::default().borders(Borders::ALL).title("Instructions"))
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

fn editor_lines(editor: &StageEditor) -> Vec<Line<'static>> {
    let cursor = editor.cursor();
    (0..editor.height())
        .map(|row| {
            let y = stage_y(row, editor.height());
            let spans: Vec<Span<'static>> = (0..editor.width())
                .map(|x| {
                    let pos = Vec2 { x, y };
                    let glyph = editor_glyph(editor.item_at(pos)).to_string();
                    if pos == cursor {
                        Span::styled(glyph, Style::default().add_modifier(Modifier::REVERSED))
                    } else {
                        Span::raw(glyph)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn tool_name(tool: Option<Tool>) -> &'static str {
    match tool {
        None => "none",
        Some(Tool::Eraser) => "eraser",
        Some(Tool::Place(EditorItem::Border)) => "border",
        Some(Tool::Place(EditorItem::Box)) => "box",
        Some(Tool::Place(EditorItem::Goal)) => "goal",
        Some(Tool::Place(EditorItem::Human)) => "human",
    }
}

pub fn render_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    editor: &StageEditor,
    state: &EditorRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)])
            .split(f.area());

        let grid = Paragraph::new(editor_lines(editor))
            .block(Block::default().borders(Borders::ALL).title("Stage Editor"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(grid, chunks[0]);

        let cursor = editor.cursor();
        let mut status = format!(
            "{}x{} | Cursor: ({}, {}) | Tool: {} | Out: {}",
            editor.width(),
            editor.height(),
            cursor.x,
            cursor.y,
            tool_name(editor.tool()),
            state.out_path,
        );
        if let Some(msg) = &state.status {
            status = format!("{} | {}", status, msg);
        }
        let status_paragraph = Paragraph::new(status)
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(status_paragraph, chunks[1]);

        let instruction_paragraph = Paragraph::new(
            "Arrows move, 1 border 2 box 3 goal 4 human 0 eraser, Space apply, S save, Q quit",
        )
        .block(Block::default().borders(Borders::ALL).title("Instructions"))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

pub enum ConsoleInput {
    UserAction(UserAction),
    Restart,
    Quit,
    Timeout,
}

pub fn action_for_key(code: KeyCode) -> ConsoleInput {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Restart,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Up))
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Down))
        }
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Left))
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Right))
        }
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            ConsoleInput::UserAction(UserAction::Undo)
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => ConsoleInput::UserAction(UserAction::Redo),
        _ => ConsoleInput::UserAction(UserAction::Noop),
    }
}

fn read_key_press(tick: Duration) -> Result<Option<KeyCode>, Box<dyn std::error::Error>> {
    if event::poll(tick)? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(Some(code));
        }
    }
    Ok(None)
}

pub fn handle_input(tick: Duration) -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    Ok(match read_key_press(tick)? {
        Some(code) => action_for_key(code),
        None => ConsoleInput::Timeout,
    })
}

pub enum EditorInput {
    MoveCursor(Direction),
    Select(Tool),
    Apply,
    Save,
    Quit,
    Timeout,
    Unknown,
}

pub fn editor_action_for_key(code: KeyCode) -> EditorInput {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => EditorInput::Quit,
        KeyCode::Up => EditorInput::MoveCursor(Direction::Up),
        KeyCode::Down => EditorInput::MoveCursor(Direction::Down),
        KeyCode::Left => EditorInput::MoveCursor(Direction::Left),
        KeyCode::Right => EditorInput::MoveCursor(Direction::Right),
        KeyCode::Char('1') => EditorInput::Select(Tool::Place(EditorItem::Border)),
        KeyCode::Char('2') => EditorInput::Select(Tool::Place(EditorItem::Box)),
        KeyCode::Char('3') => EditorInput::Select(Tool::Place(EditorItem::Goal)),
        KeyCode::Char('4') => EditorInput::Select(Tool::Place(EditorItem::Human)),
        KeyCode::Char('0') | KeyCode::Char('x') | KeyCode::Char('X') => EditorInput::Select(Tool::Eraser),
        KeyCode::Char(' ') | KeyCode::Enter => EditorInput::Apply,
        KeyCode::Char('s') | KeyCode::Char('S') => EditorInput::Save,
        _ => EditorInput::Unknown,
    }
}

pub fn handle_editor_input(tick: Duration) -> Result<EditorInput, Box<dyn std::error::Error>> {
    Ok(match read_key_press(tick)? {
        Some(code) => editor_action_for_key(code),
        None => EditorInput::Timeout,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stage_y_inverts_rows() {
        assert_eq!(stage_y(0, 3), 2);
        assert_eq!(stage_y(2, 3), 0);
        assert_eq!(stage_y(stage_y(1, 5), 5), 1);
    }

    #[test]
    fn parse_level_puts_first_line_on_top() {
        let descriptor = parse_level(r#"
#@
$.
"#);
        assert_eq!(descriptor.width, Some(2));
        assert_eq!(descriptor.height, Some(2));
        assert_eq!(descriptor.border, Some(vec![vec![0, 1]]));
        assert_eq!(descriptor.human, Some(vec![vec![1, 1]]));
        assert_eq!(descriptor.boxes, Some(vec![vec![0, 0]]));
        assert_eq!(descriptor.goal, Some(vec![vec![1, 0]]));
    }

    #[test]
    fn elapsed_formats_as_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "02:05");
    }

    #[test]
    fn unbound_keys_are_noop() {
        assert!(matches!(
            action_for_key(KeyCode::Char('k')),
            ConsoleInput::UserAction(UserAction::Noop)
        ));
        assert!(matches!(
            action_for_key(KeyCode::Char('y')),
            ConsoleInput::UserAction(UserAction::Redo)
        ));
        assert!(matches!(action_for_key(KeyCode::Esc), ConsoleInput::Quit));
    }

    #[test]
    fn editor_renders_items_top_down() {
        let mut editor = StageEditor::new(2, 2, 40).unwrap();
        editor.select(Tool::Place(EditorItem::Border));
        editor.apply(Vec2::new(0, 1)).unwrap();
        editor.select(Tool::Place(EditorItem::Human));
        editor.apply(Vec2::new(1, 0)).unwrap();
        assert_eq!(render_editor_to_string(&editor), "# \n @\n");
    }
}
