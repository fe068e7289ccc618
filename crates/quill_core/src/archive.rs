use std::collections::BTreeMap;

use chrono::Datelike;

use crate::model::Entry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntryRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMonth {
    pub month: u32,
    pub label: String,
    pub entries: Vec<ArchiveEntryRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveYear {
    pub year: i32,
    pub months: Vec<ArchiveMonth>,
}

/// Groups entries by canonical date into a year/month sidebar tree.
/// Years and months are newest first; entries keep their input order
/// within a month.
pub fn group_by_month(entries: &[Entry]) -> Vec<ArchiveYear> {
    let mut grouped: BTreeMap<i32, BTreeMap<u32, Vec<ArchiveEntryRef>>> = BTreeMap::new();
    for entry in entries {
        grouped
            .entry(entry.date.year())
            .or_default()
            .entry(entry.date.month())
            .or_default()
            .push(ArchiveEntryRef {
                id: entry.id.clone(),
                title: entry.title.clone(),
            });
    }
    grouped
        .into_iter()
        .rev()
        .map(|(year, months)| ArchiveYear {
            year,
            months: months
                .into_iter()
                .rev()
                .map(|(month, entries)| ArchiveMonth {
                    month,
                    label: month_label(month),
                    entries,
                })
                .collect(),
        })
        .collect()
}

fn month_label(month: u32) -> String {
    let label = match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    };
    label.to_string()
}
