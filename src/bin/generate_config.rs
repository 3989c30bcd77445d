//! 配置文件生成工具

use codeforge_lib::config::{create_default_config, ConfigPaths, TomlConfigWriter};
use codeforge_lib::setup::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let default_config = create_default_config();
    init_logging(&default_config.logging.level)?;

    let toml_content = TomlConfigWriter::to_toml_string(&default_config)?;

    println!("=== 默认配置文件内容 ===");
    println!("{}", toml_content);

    let paths = ConfigPaths::new()?;
    let config_path = paths.config_file();
    TomlConfigWriter::new(&config_path)
        .config_save(&default_config)
        .await?;

    println!("\n=== 配置文件已保存到: {:?} ===", config_path);

    Ok(())
}
