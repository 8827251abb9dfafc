use crate::layout::PickerView;
use std::io::Write;
use tracing::{debug, warn};

/// Отображение пикера. Инструментарий окон внешний: контроллер сообщает
/// только что показать и когда спрятать.
pub trait Presenter: Send {
    fn show(&mut self, view: &PickerView);
    fn hide(&mut self);
    /// Освобождение ресурсов при завершении
    fn close(&mut self);
}

/// Пикер в терминале: секции и сетка имён в stdout, выбор командой в stdin
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
}

impl TerminalPresenter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("Не удалось вывести пикер: {}", e);
        }
    }
}

/// Текстовое представление: заголовок секции, разделитель, строки сетки
pub fn render_view(view: &PickerView) -> String {
    let width = view.names().map(str::len).max().unwrap_or(0);
    let mut text = String::new();

    for section in &view.sections {
        if let Some(label) = &section.label {
            text.push_str(label);
            text.push('\n');
        }
        text.push_str(&"-".repeat(width.max(8)));
        text.push('\n');
        for row in &section.rows {
            let cells: Vec<String> = row.iter().map(|name| format!("{:<width$}", name)).collect();
            text.push_str(cells.join("  ").trim_end());
            text.push('\n');
        }
    }

    text
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn show(&mut self, view: &PickerView) {
        debug!("Показ пикера ({} картинок)", view.len());
        let text = render_view(view);
        self.write(&text);
        self.write("> ");
    }

    fn hide(&mut self) {
        debug!("Пикер скрыт");
    }

    fn close(&mut self) {
        self.write("\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Section, SectionKind};

    fn row(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_render_view() {
        let view = PickerView {
            sections: vec![
                Section {
                    kind: SectionKind::Frequent,
                    label: Some("Frequently Used".to_string()),
                    rows: vec![row(&["a.png", "bb.gif"])],
                },
                Section {
                    kind: SectionKind::Static,
                    label: None,
                    rows: vec![row(&["c.png"])],
                },
            ],
        };

        let text = render_view(&view);
        assert_eq!(
            text,
            "Frequently Used\n--------\na.png   bb.gif\n--------\nc.png\n"
        );
    }

    #[test]
    fn test_presenter_writes_to_output() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.show(&PickerView::default());
        presenter.close();
        assert_eq!(String::from_utf8(presenter.out).unwrap(), "> \n");
    }
}
