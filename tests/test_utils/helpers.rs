/*!
 * 测试辅助函数和宏
 */

use codeforge_lib::commands::CommandDescriptor;
use std::sync::Arc;

/// 测试操作成功的断言宏
#[macro_export]
macro_rules! assert_operation_success {
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                panic!("❌ {}: 操作失败 - {}", $message, e);
            }
        }
    };
}

/// 测试操作失败的断言宏
#[macro_export]
macro_rules! assert_operation_failure {
    ($result:expr, $message:expr) => {
        match $result {
            Ok(_) => {
                panic!("❌ {}: 预期失败但操作成功", $message);
            }
            Err(e) => e,
        }
    };
}

/// 提取命令 ID，便于比较顺序
pub fn ids(descriptors: &[Arc<CommandDescriptor>]) -> Vec<String> {
    descriptors.iter().map(|d| d.id.clone()).collect()
}

/// 提取命令标题
pub fn titles(descriptors: &[Arc<CommandDescriptor>]) -> Vec<String> {
    descriptors.iter().map(|d| d.title.clone()).collect()
}
