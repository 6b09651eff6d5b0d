//! 盤面を `x` / `o` / `-` の行文字列の列として読み書きする serde ヘルパー。
//!
//! `#[serde(with = "crate::core::serialization")]` で `Board` フィールドに付けて使う。

use crate::core::{Board, Disk};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const EMPTY_SYMBOL: char = '-';

pub fn serialize<S>(board: &Board, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let rows: Vec<String> = board
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map(Disk::symbol).unwrap_or(EMPTY_SYMBOL))
                .collect()
        })
        .collect();
    rows.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Board, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<String> = Vec::deserialize(deserializer)?;
    board_from_rows(&rows).map_err(D::Error::custom)
}

pub fn board_from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Board, String> {
    let height = rows.len();
    if height == 0 {
        return Err("board has no rows".to_string());
    }
    let width = rows[0].as_ref().chars().count();
    let mut cells = Vec::with_capacity(width * height);

    for (y, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.chars().count() != width {
            return Err(format!(
                "row {} has {} cells, expected {}",
                y,
                row.chars().count(),
                width
            ));
        }
        for c in row.chars() {
            let cell = match c {
                EMPTY_SYMBOL => None,
                other => Some(
                    Disk::from_symbol(other)
                        .ok_or_else(|| format!("unknown cell symbol {:?} in row {}", other, y))?,
                ),
            };
            cells.push(cell);
        }
    }

    Ok(Board::from_cells(width, height, cells))
}
