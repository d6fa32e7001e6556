//! Interactive menu
//!
//! The numbered text menu the catalog is normally operated from. Every
//! operation error is printed and the menu comes back; only option 9 or the
//! end of input leaves the loop.

pub mod prompt;

pub use prompt::Prompter;

use std::io::{BufRead, Write};
use std::path::Path;

use log::info;

use crate::backup::BackupManager;
use crate::config::{LivrariaPaths, Settings};
use crate::display::{format_author_results, format_book_list, format_prune_report};
use crate::error::{LivrariaError, LivrariaResult};
use crate::export::export_books_to_file;
use crate::models::NewBook;
use crate::services::{BookService, ImportService};
use crate::storage::Storage;

const MENU: &str = "\nMenu:
1. Adicionar novo livro
2. Exibir todos os livros
3. Atualizar preço de um livro
4. Remover um livro
5. Buscar livros por autor
6. Exportar dados para CSV
7. Importar dados de CSV
8. Fazer backup do banco de dados
9. Sair";

const BOOK_NOT_FOUND: &str = "Livro não encontrado.";

/// What the loop should do after handling one option
enum Flow {
    Continue,
    Quit,
}

/// Interactive session over one catalog
pub struct Shell<'a, R, W> {
    storage: &'a Storage,
    paths: &'a LivrariaPaths,
    settings: &'a Settings,
    prompter: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        storage: &'a Storage,
        paths: &'a LivrariaPaths,
        settings: &'a Settings,
        input: R,
        output: W,
    ) -> Self {
        Self {
            storage,
            paths,
            settings,
            prompter: Prompter::new(input, output),
        }
    }

    /// Run the menu until the operator quits or input ends
    pub fn run(&mut self) -> LivrariaResult<()> {
        info!("event=shell_start module=shell status=ok");

        loop {
            self.prompter.say(MENU)?;
            let Some(choice) = self.prompter.prompt_string("Escolha uma opção: ")? else {
                break;
            };

            let outcome = match choice.as_str() {
                "1" => self.add_book(),
                "2" => self.list_books(),
                "3" => self.update_price(),
                "4" => self.remove_book(),
                "5" => self.search_by_author(),
                "6" => self.export_csv(),
                "7" => self.import_csv(),
                "8" => self.backup().map(|()| Flow::Continue),
                "9" => Ok(Flow::Quit),
                _ => self.prompter.say("Opção inválida.").map(|()| Flow::Continue),
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) => self.report_error(&err)?,
            }
        }

        info!("event=shell_stop module=shell status=ok");
        Ok(())
    }

    /// Consume the shell and return the output sink
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    fn add_book(&mut self) -> LivrariaResult<Flow> {
        let Some(title) = self.prompter.prompt_non_empty("Título: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(author) = self.prompter.prompt_non_empty("Autor: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(year) = self.prompter.prompt_positive_int("Ano de Publicação: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(price) = self.prompter.prompt_positive_float("Preço: ")? else {
            return Ok(Flow::Quit);
        };

        BookService::new(self.storage).add(NewBook::new(title, author, year, price))?;
        self.prompter.say("Livro adicionado com sucesso!")?;
        self.auto_backup()?;
        Ok(Flow::Continue)
    }

    fn list_books(&mut self) -> LivrariaResult<Flow> {
        let books = BookService::new(self.storage).list()?;
        self.prompter
            .say(format_book_list(&books, &self.settings.currency_symbol))?;
        Ok(Flow::Continue)
    }

    fn update_price(&mut self) -> LivrariaResult<Flow> {
        let Some(id) = self
            .prompter
            .prompt_positive_int("ID do livro a ser atualizado: ")?
        else {
            return Ok(Flow::Quit);
        };
        let Some(price) = self.prompter.prompt_positive_float("Novo preço: ")? else {
            return Ok(Flow::Quit);
        };

        match BookService::new(self.storage).update_price(id, price) {
            Ok(_) => {
                self.prompter.say("Preço atualizado com sucesso!")?;
                self.auto_backup()?;
            }
            Err(err) if err.is_not_found() => self.prompter.say(BOOK_NOT_FOUND)?,
            Err(err) => return Err(err),
        }
        Ok(Flow::Continue)
    }

    fn remove_book(&mut self) -> LivrariaResult<Flow> {
        let Some(id) = self
            .prompter
            .prompt_positive_int("ID do livro a ser removido: ")?
        else {
            return Ok(Flow::Quit);
        };

        match BookService::new(self.storage).remove(id) {
            Ok(_) => {
                self.prompter.say("Livro removido com sucesso!")?;
                self.auto_backup()?;
            }
            Err(err) if err.is_not_found() => self.prompter.say(BOOK_NOT_FOUND)?,
            Err(err) => return Err(err),
        }
        Ok(Flow::Continue)
    }

    fn search_by_author(&mut self) -> LivrariaResult<Flow> {
        let Some(author) = self.prompter.prompt_string("Digite o nome do autor: ")? else {
            return Ok(Flow::Quit);
        };

        let books = BookService::new(self.storage).find_by_author(&author)?;
        self.prompter
            .say(format_author_results(&books, &self.settings.currency_symbol))?;
        Ok(Flow::Continue)
    }

    fn export_csv(&mut self) -> LivrariaResult<Flow> {
        let output = self.paths.export_file();
        export_books_to_file(self.storage, &output)?;
        self.prompter
            .say(format!("Dados exportados para {}", output.display()))?;
        Ok(Flow::Continue)
    }

    fn import_csv(&mut self) -> LivrariaResult<Flow> {
        let Some(path) = self.prompter.prompt_string("Caminho para o arquivo CSV: ")? else {
            return Ok(Flow::Quit);
        };

        let result = ImportService::new(self.storage).import_file(Path::new(&path))?;
        self.prompter.say(format!(
            "Dados importados com sucesso! ({} livro(s))",
            result.imported
        ))?;
        self.auto_backup()?;
        Ok(Flow::Continue)
    }

    fn backup(&mut self) -> LivrariaResult<()> {
        let manager = BackupManager::new(self.paths, self.settings.backup_retention);
        let (path, report) = manager.create_backup_with_retention()?;

        self.prompter
            .say(format!("Backup realizado em {}", path.display()))?;
        if !report.is_clean() {
            self.prompter.say(format_prune_report(&report))?;
        }
        Ok(())
    }

    /// Snapshot after a committed change, when enabled
    ///
    /// A failed snapshot is reported but does not undo the change.
    fn auto_backup(&mut self) -> LivrariaResult<()> {
        if !self.settings.auto_backup {
            return Ok(());
        }
        if let Err(err) = self.backup() {
            self.report_error(&err)?;
        }
        Ok(())
    }

    fn report_error(&mut self, err: &LivrariaError) -> LivrariaResult<()> {
        self.prompter.say(format!("Erro: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run_session(input: &str, settings: &Settings) -> (String, LivrariaPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();

        let mut shell = Shell::new(&storage, &paths, settings, input.as_bytes(), Vec::new());
        shell.run().unwrap();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (output, paths, temp_dir)
    }

    #[test]
    fn test_add_then_list() {
        let settings = Settings::default();
        let (output, paths, _temp) = run_session(
            "1\nO Hobbit\nJ.R.R. Tolkien\n1937\n39.90\n2\n9\n",
            &settings,
        );

        assert!(output.contains("Livro adicionado com sucesso!"));
        assert!(output.contains(
            "ID: 1, Título: O Hobbit, Autor: J.R.R. Tolkien, Ano: 1937, Preço: R$ 39.90"
        ));
        assert!(output.contains("Backup realizado em"));
        assert_eq!(std::fs::read_dir(paths.backup_dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_add_reprompts_invalid_numbers() {
        let mut settings = Settings::default();
        settings.auto_backup = false;
        let (output, _paths, _temp) = run_session(
            "1\nO Hobbit\nJ.R.R. Tolkien\n-1\nmil\n1937\n0\n39.90\n9\n",
            &settings,
        );

        assert!(output.contains("O valor deve ser um número positivo."));
        assert!(output.contains("Valor inválido. Digite um número inteiro."));
        assert!(output.contains("Livro adicionado com sucesso!"));
        assert!(!output.contains("Backup realizado em"));
    }

    #[test]
    fn test_missing_ids_report_not_found() {
        let settings = Settings::default();
        let (output, paths, _temp) = run_session("3\n7\n10\n4\n7\n2\n9\n", &settings);

        assert_eq!(output.matches(BOOK_NOT_FOUND).count(), 2);
        assert!(output.contains("Nenhum livro cadastrado."));
        assert_eq!(std::fs::read_dir(paths.backup_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_import_error_keeps_session_alive() {
        let settings = Settings::default();
        let (output, _paths, _temp) =
            run_session("7\n/definitely/not/here.csv\n2\n9\n", &settings);

        assert!(output.contains("Erro: Import error: File not found"));
        assert!(output.contains("Nenhum livro cadastrado."));
    }

    #[test]
    fn test_invalid_option_and_eof() {
        let settings = Settings::default();
        let (output, _paths, _temp) = run_session("42\n", &settings);

        assert!(output.contains("Opção inválida."));
        assert_eq!(output.matches("Escolha uma opção: ").count(), 2);
    }

    #[test]
    fn test_export_writes_fixed_path() {
        let mut settings = Settings::default();
        settings.auto_backup = false;
        let (output, paths, _temp) = run_session(
            "1\nO Hobbit\nJ.R.R. Tolkien\n1937\n39.90\n6\n9\n",
            &settings,
        );

        assert!(output.contains("Dados exportados para"));
        let csv = std::fs::read_to_string(paths.export_file()).unwrap();
        assert_eq!(
            csv,
            "id,titulo,autor,ano_publicacao,preco\n1,O Hobbit,J.R.R. Tolkien,1937,39.9\n"
        );
    }
}
