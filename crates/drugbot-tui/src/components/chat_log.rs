use crossterm::event::{KeyCode, KeyEvent};
use drugbot_core::{ChatMessage, Transcript};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Scrolling view of the conversation.
///
/// Selection moves between assistant messages only; the selected index is a
/// transcript index.
#[derive(Debug, Default)]
pub struct ChatLog {
    selected: Option<usize>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select the newest answer, if any.
    pub fn select_last(&mut self, transcript: &Transcript) {
        self.selected = transcript.assistant_indices().last().copied();
    }

    pub fn handle_key(&mut self, key: KeyEvent, transcript: &Transcript) {
        let answers = transcript.assistant_indices();
        if answers.is_empty() {
            self.selected = None;
            return;
        }
        let pos = self
            .selected
            .and_then(|sel| answers.iter().position(|i| *i == sel));
        let next = match key.code {
            KeyCode::Char('j') | KeyCode::Down => match pos {
                Some(p) => (p + 1).min(answers.len() - 1),
                None => answers.len() - 1,
            },
            KeyCode::Char('k') | KeyCode::Up => match pos {
                Some(p) => p.saturating_sub(1),
                None => answers.len() - 1,
            },
            KeyCode::Char('g') | KeyCode::Home => 0,
            KeyCode::Char('G') | KeyCode::End => answers.len() - 1,
            _ => return,
        };
        self.selected = Some(answers[next]);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, transcript: &Transcript, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .title(" Conversation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if transcript.is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                " Ask a question about the drug database, or press Esc then x for examples.",
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(hint, inner);
            return;
        }

        let width = inner.width.saturating_sub(2).max(10) as usize;
        let (lines, selected_line) = self.build_lines(transcript, width, focused);

        // Follow the selection while browsing, otherwise stick to the bottom.
        let height = inner.height as usize;
        let bottom = lines.len().saturating_sub(height);
        let scroll = match selected_line {
            Some(line) if focused => line.min(bottom),
            _ => bottom,
        };

        let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
        frame.render_widget(paragraph, inner);
    }

    fn build_lines(
        &self,
        transcript: &Transcript,
        width: usize,
        focused: bool,
    ) -> (Vec<Line<'static>>, Option<usize>) {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut selected_line = None;

        for (round, (question, answer)) in transcript.pairs().into_iter().enumerate() {
            if round > 0 {
                lines.push(Line::from(Span::styled(
                    "─".repeat(width),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            if let Some(q) = question {
                push_message(&mut lines, q, width, false);
            }
            if let Some(a) = answer {
                let index = transcript
                    .messages()
                    .iter()
                    .position(|m| std::ptr::eq(m, a));
                let is_selected = focused && index.is_some() && index == self.selected;
                if is_selected {
                    selected_line = Some(lines.len());
                }
                push_message(&mut lines, a, width, is_selected);
            }
        }

        (lines, selected_line)
    }
}

fn push_message(lines: &mut Vec<Line<'static>>, message: &ChatMessage, width: usize, selected: bool) {
    let (label, label_style) = if message.is_user() {
        ("You".to_string(), Style::default().fg(Color::Yellow).bold())
    } else {
        let label = match message.tool() {
            Some(tool) => format!("DrugBot [{}]", tool.badge()),
            None => "DrugBot".to_string(),
        };
        (label, Style::default().fg(Color::Green).bold())
    };

    let marker = if selected { "▶ " } else { "  " };
    lines.push(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan).bold()),
        Span::styled(label, label_style),
    ]));

    let body_style = if selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    for text in wrap_text(message.content(), width.saturating_sub(2).max(1)) {
        lines.push(Line::from(Span::styled(format!("  {text}"), body_style)));
    }
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;
        for word in raw_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if current_len > 0 {
                    out.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                out.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if current_len == 0 { word.len() } else { word.len() + 1 };
            if current_len + needed > width && current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }
        out.push(current);
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use drugbot_core::QueryTool;

    fn transcript() -> Transcript {
        let mut t = Transcript::new();
        t.push(ChatMessage::user("q1"));
        t.push(ChatMessage::assistant("a1", Some(QueryTool::Sql), None));
        t.push(ChatMessage::user("q2"));
        t.push(ChatMessage::assistant("a2", Some(QueryTool::Graph), None));
        t
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn selection_moves_between_answers() {
        let t = transcript();
        let mut log = ChatLog::new();
        log.select_last(&t);
        assert_eq!(log.selected(), Some(3));
        log.handle_key(key('k'), &t);
        assert_eq!(log.selected(), Some(1));
        log.handle_key(key('k'), &t);
        assert_eq!(log.selected(), Some(1));
        log.handle_key(key('j'), &t);
        assert_eq!(log.selected(), Some(3));
    }

    #[test]
    fn empty_transcript_has_no_selection() {
        let mut log = ChatLog::new();
        log.handle_key(key('j'), &Transcript::new());
        assert_eq!(log.selected(), None);
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap_text("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }
}
