//! Interactive menu shell.
//!
//! The shell owns the store and a [`Console`]. User-input errors are printed
//! and the current action is abandoned; storage and console failures end the
//! loop with an error.

use std::num::IntErrorKind;

use phonebook_core::schema::normalize_name;
use phonebook_core::{
    Contact, Error as CoreError, Field, StorageBackend, Store, directory, field_list,
};
use tracing::debug;

use crate::console::Console;
use crate::error::Result;

const PAUSE: &str = "Нажмите Enter для продолжения...";
const INVALID_SELECTION: &str = "Неверный индекс или такого поля нет. Начните сначала.";
const NOT_A_NUMBER: &str = "Значение должно быть числом";
const NO_DATA: &str = "Нет данных";

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1. Show contacts
    Show,
    /// 2. Add contact
    Add,
    /// 3. Edit contact
    Edit,
    /// 4. Search contacts
    Search,
    /// 5. Exit
    Exit,
}

impl MenuChoice {
    /// Parse the user's menu selection. Only the exact digits 1-5 match.
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::Show),
            "2" => Some(Self::Add),
            "3" => Some(Self::Edit),
            "4" => Some(Self::Search),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu loop over a store and a console.
pub struct Shell<B: StorageBackend, C: Console> {
    store: Store<B>,
    console: C,
    page_size: usize,
}

impl<B: StorageBackend, C: Console> Shell<B, C> {
    /// Creates a shell. A `page_size` of zero is treated as one.
    pub fn new(store: Store<B>, console: C, page_size: usize) -> Self {
        Self {
            store,
            console,
            page_size: page_size.max(1),
        }
    }

    /// Run the menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? == Flow::Continue {}
        Ok(())
    }

    /// Consume the shell, returning the store and console.
    pub fn into_parts(self) -> (Store<B>, C) {
        (self.store, self.console)
    }

    /// The store being edited.
    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    fn step(&mut self) -> Result<Flow> {
        self.say("")?;
        self.say("Меню телефонного справочника:")?;
        self.say("1. Показать контакты")?;
        self.say("2. Добавить контакт")?;
        self.say("3. Редактировать контакт")?;
        self.say("4. Поиск контактов")?;
        self.say("5. Выйти")?;

        let Some(choice) = self.ask("Введите ваш выбор (1-5): ")? else {
            return Ok(Flow::Exit);
        };
        debug!("Menu choice {choice:?}");

        match MenuChoice::parse(&choice) {
            Some(MenuChoice::Show) => self.show_contacts(),
            Some(MenuChoice::Add) => self.add_contact(),
            Some(MenuChoice::Edit) => self.edit_contact(),
            Some(MenuChoice::Search) => self.search_contacts(),
            Some(MenuChoice::Exit) => {
                self.say("Выход из телефонного справочника. До свидания!")?;
                Ok(Flow::Exit)
            }
            None => {
                self.say("Неверный выбор. Введите число от 1 до 5.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn show_contacts(&mut self) -> Result<Flow> {
        let page_size = self.page_size;
        let Self { store, console, .. } = self;
        for page in store.list_all(page_size) {
            for (index, contact) in page.entries() {
                console.write_line(&index.to_string())?;
                console.write_line(&directory::display_contact(contact))?;
                console.write_line("")?;
            }
            if wait_for_enter(console)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn add_contact(&mut self) -> Result<Flow> {
        let mut contact = Contact::default();
        for field in Field::ALL {
            let Some(value) = self.ask(field.prompt())? else {
                return Ok(Flow::Exit);
            };
            contact.set(field, value);
        }
        self.store.append(contact)?;
        self.say("Контакт успешно добавлен.")?;
        Ok(Flow::Continue)
    }

    fn edit_contact(&mut self) -> Result<Flow> {
        let Some(raw_index) = self.ask("Введите номер контакта для редактирования : ")? else {
            return Ok(Flow::Exit);
        };
        let index = match parse_index(&raw_index) {
            Ok(index) => index,
            Err(e) => {
                debug!("{e}");
                self.say(NOT_A_NUMBER)?;
                return Ok(Flow::Continue);
            }
        };

        self.print_field_list()?;
        let Some(field_name) = self.ask("Введите поле из списка для редактирования: ")? else {
            return Ok(Flow::Exit);
        };
        let field = match self.store.validate_selection(index, &field_name) {
            Ok(field) => field,
            Err(e) if e.is_user_error() => {
                self.say(INVALID_SELECTION)?;
                return Ok(Flow::Continue);
            }
            Err(e) => return Err(e.into()),
        };

        let Some(value) = self.ask(&format!("Введите новое значение для {field}: "))? else {
            return Ok(Flow::Exit);
        };
        self.store.set_field(index, field, value)?;
        self.say("Контакт успешно обновлен.")?;
        Ok(Flow::Continue)
    }

    fn search_contacts(&mut self) -> Result<Flow> {
        self.print_field_list()?;
        let Some(field_name) = self.ask("Введите поле из списка для поиска: ")? else {
            return Ok(Flow::Exit);
        };
        let label = normalize_name(&field_name);
        let Some(value) = self.ask(&format!("Введите значение для поиска по полю {label}: "))?
        else {
            return Ok(Flow::Exit);
        };

        let results: Vec<String> = match self.store.search(&field_name, &value) {
            Ok(found) => found.into_iter().map(directory::display_contact).collect(),
            Err(e) if e.is_user_error() => {
                debug!("{e}");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Search {label}={value:?} matched {}", results.len());

        self.say("")?;
        self.say("Результаты поиска:")?;
        if results.is_empty() {
            self.say(NO_DATA)?;
        } else {
            for block in &results {
                self.console.write_line(block)?;
                self.say("")?;
            }
        }
        self.pause()
    }

    fn print_field_list(&mut self) -> Result<()> {
        self.say("Список полей справочника:")?;
        self.say(&field_list())
    }

    fn pause(&mut self) -> Result<Flow> {
        wait_for_enter(&mut self.console)
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self.console.read_line(prompt)?)
    }

    fn say(&mut self, line: &str) -> Result<()> {
        Ok(self.console.write_line(line)?)
    }
}

fn wait_for_enter<C: Console>(console: &mut C) -> Result<Flow> {
    Ok(match console.read_line(PAUSE)? {
        Some(_) => Flow::Continue,
        None => Flow::Exit,
    })
}

/// Parse a 1-based record index.
///
/// Any integer is accepted; zero and negative numbers come back as `0` so
/// they are rejected by the range check rather than as non-numeric input.
/// Integers too large to represent come back as `usize::MAX` for the same
/// reason.
pub fn parse_index(input: &str) -> std::result::Result<usize, CoreError> {
    match input.trim().parse::<i64>() {
        Ok(n) => Ok(usize::try_from(n).unwrap_or(0)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(usize::MAX),
            IntErrorKind::NegOverflow => Ok(0),
            _ => Err(CoreError::non_numeric(input)),
        },
    }
}
