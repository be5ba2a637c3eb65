//! End-to-end shell sessions against a real backing file.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::path::Path;

use phonebook_cli::console::{IoConsole, ScriptedConsole};
use phonebook_cli::shell::Shell;
use phonebook_core::{Contact, Field, FileBackend, Store};

fn run_session(path: &Path, input: &[&str], page_size: usize) -> (Store<FileBackend>, ScriptedConsole) {
    let store = Store::open(FileBackend::new(path)).expect("store should open");
    let mut shell = Shell::new(store, ScriptedConsole::new(input.iter().copied()), page_size);
    shell.run().expect("session should finish cleanly");
    shell.into_parts()
}

#[test]
fn test_add_edit_search_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phone_book_data.json");

    let (store, console) = run_session(
        &path,
        &[
            "2", "Ivanov", "Ivan", "Ivanovich", "AcmeCo", "111", "222",
            "3", "1", "рабочий телефон", "999",
            "4", "фамилия", "Ivanov", "",
            "5",
        ],
        5,
    );

    assert_eq!(store.len(), 1);
    let contact = store.get(1).unwrap();
    assert_eq!(contact.get(Field::WorkPhone), "999");
    assert!(contact.updated().is_some());

    let out = console.transcript();
    assert!(out.contains("Контакт успешно добавлен."));
    assert!(out.contains("Введите новое значение для Рабочий телефон: "));
    assert!(out.contains("Контакт успешно обновлен."));
    assert!(out.contains("Введите значение для поиска по полю Фамилия: "));
    assert!(out.contains("Результаты поиска:\nФИО: Ivanov Ivan Ivanovich"));
    assert!(out.contains("Рабочий телефон: 999"));
    assert!(!out.contains("Нет данных"));

    let reopened = Store::open(FileBackend::new(&path)).unwrap();
    assert_eq!(reopened.contacts(), store.contacts());
}

#[test]
fn test_listing_pauses_after_each_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    {
        let mut store = Store::open(FileBackend::new(&path)).unwrap();
        for i in 1..=5 {
            store
                .append(Contact::new(format!("L{i}"), "F", "M", "O", "1", "2"))
                .unwrap();
        }
    }

    let (_, console) = run_session(&path, &["1", "", "", "", "5"], 2);

    let pauses = console
        .output()
        .iter()
        .filter(|l| l.as_str() == "Нажмите Enter для продолжения...")
        .count();
    assert_eq!(pauses, 3);

    let out = console.output();
    let first = out.iter().position(|l| l == "1").unwrap();
    assert_eq!(out[first + 1].lines().next(), Some("ФИО: L1 F M"));
    assert!(out.iter().any(|l| l == "5"));
}

#[test]
fn test_search_without_matches_reports_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");

    let (_, console) = run_session(&path, &["4", "Фамилия", "X", "", "5"], 5);

    assert!(console.transcript().contains("Результаты поиска:\nНет данных"));
}

#[test]
fn test_rejected_edit_keeps_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    run_session(&path, &["2", "A", "B", "C", "D", "1", "2", "5"], 5);
    let before = std::fs::read(&path).unwrap();

    let (_, console) = run_session(&path, &["3", "0", "Имя", "3", "7", "Имя", "3", "1", "Адрес", "5"], 5);

    let rejections = console
        .output()
        .iter()
        .filter(|l| l.as_str() == "Неверный индекс или такого поля нет. Начните сначала.")
        .count();
    assert_eq!(rejections, 3);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_huge_index_is_out_of_range_not_non_numeric() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");

    let (_, console) = run_session(&path, &["3", "99999999999999999999", "Имя", "5"], 5);

    let out = console.output();
    assert!(
        out.iter()
            .any(|l| l == "Неверный индекс или такого поля нет. Начните сначала.")
    );
    assert!(!out.iter().any(|l| l == "Значение должно быть числом"));
}

#[test]
fn test_invalid_utf8_input_does_not_end_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let input: &[u8] = b"2\n\xff\xfe\nB\nC\nD\n1\n2\n5\n";

    let store = Store::open(FileBackend::new(&path)).unwrap();
    let mut shell = Shell::new(store, IoConsole::new(input, Vec::new()), 5);
    shell.run().expect("session should finish cleanly");
    let (store, console) = shell.into_parts();

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(1).unwrap().get(Field::LastName), "\u{FFFD}\u{FFFD}");
    let out = String::from_utf8(console.into_writer()).unwrap();
    assert!(out.contains("Контакт успешно добавлен."));
    assert!(out.contains("До свидания!"));
}

#[test]
fn test_listing_stops_at_first_unanswered_pause() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    {
        let mut store = Store::open(FileBackend::new(&path)).unwrap();
        for i in 1..=5 {
            store
                .append(Contact::new(format!("L{i}"), "F", "M", "O", "1", "2"))
                .unwrap();
        }
    }

    let (_, console) = run_session(&path, &["1"], 2);

    let out = console.output();
    assert!(out.iter().any(|l| l == "2"));
    assert!(!out.iter().any(|l| l == "3"));
}
