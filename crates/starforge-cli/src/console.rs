//! Interactive curation port backed by the terminal.
//!
//! Prompts follow the S/N convention: `S` accepts, `N` declines, a bare
//! Enter keeps the suggested default. Generic over reader and writer so
//! the dialogue is testable without a TTY.

use std::io::{BufRead, Write};

use colored::Colorize;
use starforge::{CategoryExclusion, CurationPort};

pub struct ConsolePort<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePort<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> String {
        let mut line = String::new();
        // EOF behaves like a bare Enter: every prompt has a safe default.
        let _ = self.input.read_line(&mut line);
        line.trim().to_string()
    }

    fn prompt(&mut self, message: &str) -> String {
        let _ = write!(self.output, "{} ", message);
        let _ = self.output.flush();
        self.read_line()
    }

    fn prompt_yes_no(&mut self, message: &str) -> bool {
        let answer = self.prompt(&format!("{} (S/N)", message));
        answer.eq_ignore_ascii_case("s") || answer.eq_ignore_ascii_case("sim")
    }

    fn list_columns(&mut self, title: &str, columns: &[String]) {
        let _ = writeln!(self.output, "{}", title.yellow().bold());
        for column in columns {
            let _ = writeln!(self.output, "  - {}", column);
        }
    }
}

impl<R: BufRead, W: Write> CurationPort for ConsolePort<R, W> {
    fn confirm_primary_key(
        &mut self,
        suggested: Option<&str>,
        columns: &[String],
    ) -> Option<String> {
        match suggested {
            Some(name) => {
                let accepted = self.prompt_yes_no(&format!(
                    "Chave primária sugerida: {}. Aceitar?",
                    name.cyan().bold()
                ));
                if accepted {
                    return Some(name.to_string());
                }
            }
            None => {
                let _ = writeln!(self.output, "Nenhuma chave primária foi sugerida.");
            }
        }

        self.list_columns("Colunas disponíveis:", columns);
        let answer = self.prompt("Informe a coluna da chave primária (Enter = nenhuma):");
        if answer.is_empty() {
            None
        } else {
            Some(answer)
        }
    }

    fn choose_dimension_keys(
        &mut self,
        key_candidates: &[String],
        primary_key: Option<&str>,
        _columns: &[String],
    ) -> Vec<String> {
        if !key_candidates.is_empty() {
            self.list_columns("Colunas candidatas a chave de dimensão:", key_candidates);
        }
        if let Some(pk) = primary_key {
            let _ = writeln!(self.output, "Enter mantém apenas a chave primária ({}).", pk);
        }

        let answer =
            self.prompt("Informe as chaves de dimensão separadas por vírgula (Enter = padrão):");
        if answer.is_empty() {
            return Vec::new();
        }
        answer
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn category_exclusions(&mut self, columns: &[String]) -> Vec<CategoryExclusion> {
        let mut exclusions = Vec::new();

        while self.prompt_yes_no("Deseja excluir categorias antes da análise?") {
            self.list_columns("Colunas disponíveis:", columns);
            let column = self.prompt("Coluna da categoria:");
            if column.is_empty() {
                continue;
            }
            let values: Vec<String> = self
                .prompt("Valores a excluir separados por vírgula:")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !values.is_empty() {
                exclusions.push(CategoryExclusion { column, values });
            }
        }

        exclusions
    }
}
