use crate::error::ImportError;
use crate::models::raw_row::{Column, RawRow};
use anyhow::{Context, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tokio::fs;

/// 将表格字节流解码为原始行列表
///
/// 只读取第一个工作表（索引 0），不管它叫什么名字。已用区域的第一行作为表头，
/// 之后每个非空行对应一个 [`RawRow`]，顺序与表格中的行顺序一致。
///
/// 只有所有单元格都为空的行才会被跳过；只含空白字符的单元格不算空。
///
/// # 返回
/// - 字节流不是可识别的工作簿时返回 `ImportError::ParseFailure`
/// - 工作表为空时返回空列表（由调用方决定是否视为无有效数据）
pub fn decode_workbook(bytes: &[u8]) -> Result<Vec<RawRow>, ImportError> {
    decode_from_reader(Cursor::new(bytes))
}

/// 与 [`decode_workbook`] 相同，但直接接管已拥有的缓冲区
pub fn decode_workbook_owned(bytes: Vec<u8>) -> Result<Vec<RawRow>, ImportError> {
    decode_from_reader(Cursor::new(bytes))
}

fn decode_from_reader<RS>(reader: RS) -> Result<Vec<RawRow>, ImportError>
where
    RS: Read + Seek + Clone,
{
    let mut workbook = open_workbook_auto_from_rs(reader)?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(ImportError::parse_failure("工作簿中没有任何工作表")),
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        tracing::debug!("第一个工作表为空");
        return Ok(Vec::new());
    };

    let columns = map_header(header);
    tracing::debug!(
        "表头识别结果: {:?}",
        columns.iter().flatten().map(|c| c.header()).collect::<Vec<_>>()
    );

    Ok(rows
        .filter(|row| !is_blank_row(row))
        .map(|row| to_raw_row(row, &columns))
        .collect())
}

/// 判断一行是否完全空白（按未处理的单元格判断，不做去空白）
fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| matches!(cell, Data::Empty))
}

fn to_raw_row(row: &[Data], columns: &[Option<Column>]) -> RawRow {
    let mut raw = RawRow::new();
    for (cell, column) in row.iter().zip(columns) {
        let Some(column) = column else {
            continue;
        };
        let text = cell_text(cell);
        if !text.is_empty() {
            raw.insert(*column, text);
        }
    }
    raw
}

/// 从磁盘读取表格文件的原始字节
pub async fn read_spreadsheet_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .await
        .with_context(|| format!("无法读取表格文件: {}", path.display()))
}

/// 把表头行映射为列，重复的列名只取第一次出现的位置
fn map_header(header: &[Data]) -> Vec<Option<Column>> {
    let mut seen = Vec::new();
    header
        .iter()
        .map(|cell| {
            let column = Column::from_header(&cell_text(cell))?;
            if seen.contains(&column) {
                return None;
            }
            seen.push(column);
            Some(column)
        })
        .collect()
}

/// 单元格转为去除首尾空白的文本
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(n) => format_number(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_number(dt.as_f64()),
    }
}

/// 整数值的浮点数不带小数部分输出
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
