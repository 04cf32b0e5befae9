/// 工具函数集合

use crate::{Error, Result};

/// 解析 `du -s <path>` 的标准输出
///
/// 期望格式为 `<数字>\t<路径>`，只取第一个制表符之前的数字部分。
/// 缺少制表符、数字为空、非数字、负数或非有限值都视为解析失败。
pub fn parse_du_output(stdout: &str) -> Result<f64> {
    let (size, _path) = stdout
        .split_once('\t')
        .ok_or_else(|| Error::Parse(format!("missing tab separator in {:?}", stdout)))?;

    let size: f64 = size
        .trim()
        .parse()
        .map_err(|e| Error::Parse(format!("invalid size {:?}: {}", size, e)))?;

    if !size.is_finite() || size < 0.0 {
        return Err(Error::Parse(format!("size out of range: {}", size)));
    }

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_du_output() {
        assert_eq!(parse_du_output("12345\t/var/log\n").unwrap(), 12345.0);
        assert_eq!(parse_du_output("0\t/empty\n").unwrap(), 0.0);
        // 路径本身包含制表符时只切第一个
        assert_eq!(parse_du_output("8\t/tmp/a\tb\n").unwrap(), 8.0);
    }

    #[test]
    fn test_parse_du_output_rejects_malformed() {
        assert!(matches!(parse_du_output("not-a-number\tfoo"), Err(Error::Parse(_))));
        assert!(matches!(parse_du_output("12345 /var/log\n"), Err(Error::Parse(_))));
        assert!(matches!(parse_du_output(""), Err(Error::Parse(_))));
        assert!(matches!(parse_du_output("\t/var/log"), Err(Error::Parse(_))));
        assert!(matches!(parse_du_output("-4\t/var/log"), Err(Error::Parse(_))));
        assert!(matches!(parse_du_output("NaN\t/var/log"), Err(Error::Parse(_))));
        assert!(matches!(parse_du_output("inf\t/var/log"), Err(Error::Parse(_))));
    }
}
