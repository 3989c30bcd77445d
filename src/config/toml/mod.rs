/*!
 * TOML配置模块
 *
 * - reader: 配置读取
 * - writer: 配置写入
 * - validator: 配置验证
 */

pub mod reader;
pub mod validator;
pub mod writer;

pub use reader::TomlConfigReader;
pub use validator::{TomlConfigValidator, HISTORY_LIMIT_RANGE};
pub use writer::TomlConfigWriter;
