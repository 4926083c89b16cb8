//! # 解析器模块
//!
//! 提供 VASP OUTCAR 的能带与费米能解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: outcar, fermi

pub mod fermi;
pub mod outcar;

use crate::error::{Result, VaspGapError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::Path;

/// 打开文件并包装为带缓冲的读取器
pub(crate) fn open_reader(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| VaspGapError::FileUnreadable {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(BufReader::new(file))
}

/// 逐行遍历，回调收到 1 起的行号和去掉换行符的内容。
///
/// 按字节切分后有损解码，非 UTF-8 字节不会中断整个文件的解析。
pub(crate) fn for_each_line<R, F>(mut reader: R, source: &str, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str) -> ControlFlow<()>,
{
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| VaspGapError::FileUnreadable {
                path: source.to_string(),
                source: e,
            })?;
        if n == 0 {
            break;
        }
        line_no += 1;

        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(&['\r', '\n'][..]);
        if f(line_no, line).is_break() {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_line_strips_newlines() {
        let content = "first\r\nsecond\n\nlast";
        let mut seen = Vec::new();
        for_each_line(content.as_bytes(), "<memory>", |no, line| {
            seen.push((no, line.to_string()));
            ControlFlow::Continue(())
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (1, "first".to_string()),
                (2, "second".to_string()),
                (3, String::new()),
                (4, "last".to_string()),
            ]
        );
    }

    #[test]
    fn test_for_each_line_stops_on_break() {
        let mut count = 0;
        for_each_line("a\nb\nc\n".as_bytes(), "<memory>", |_, line| {
            count += 1;
            if line == "b" {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_for_each_line_tolerates_invalid_utf8() {
        let bytes: &[u8] = b"ok\n\xff\xfe bad\nafter\n";
        let mut lines = Vec::new();
        for_each_line(bytes, "<memory>", |_, line| {
            lines.push(line.to_string());
            ControlFlow::Continue(())
        })
        .unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "after");
    }

    #[test]
    fn test_open_reader_missing_file() {
        let err = open_reader(Path::new("/definitely/not/here/OUTCAR")).unwrap_err();
        assert!(matches!(err, VaspGapError::FileUnreadable { .. }));
    }
}
