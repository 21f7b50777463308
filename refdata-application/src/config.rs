//! 运行配置
//!
//! 分层加载：可选的配置文件，再叠加 `REFDATA__*` 环境变量
//! （例如 `REFDATA__NAMING__SITE_LABEL` 对应 `naming.site_label`）。
//!
use crate::error::AppResult;
use ::config::{Config, Environment, File};
use refdata_domain::naming::NamingConventions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const ENV_PREFIX: &str = "REFDATA";

/// 管理列表中名称/别名的截断长度
pub const DISPLAY_NAME_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    pub display_name_size: usize,
    /// 非超级用户仅能看到自己创建的记录
    pub limit_to_request_user: bool,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            display_name_size: DISPLAY_NAME_SIZE,
            limit_to_request_user: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub naming: NamingConventions,
    pub admin: AdminSettings,
}

/// 加载配置；`path` 为空时仅读取环境变量，给定时文件必须存在
pub fn load_settings(path: Option<impl AsRef<Path>>) -> AppResult<Settings> {
    let mut builder = Config::builder();
    if let Some(path) = &path {
        let path = path.as_ref();
        info!("Loading settings from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<Settings>()?;

    info!(
        site_label = %settings.naming.site_label,
        display_name_size = settings.admin.display_name_size,
        "settings loaded"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_sources() {
        let settings = load_settings(None::<&Path>).unwrap();
        assert_eq!(settings.naming.site_label, "sl");
        assert_eq!(settings.admin.display_name_size, DISPLAY_NAME_SIZE);
        assert!(!settings.admin.limit_to_request_user);
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!(
            "refdata-settings-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[naming]\nsite_label = \"acme\"\n[admin]\ndisplay_name_size = 12").unwrap();
        drop(file);

        let settings = load_settings(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.naming.site_label, "acme");
        assert_eq!(settings.admin.display_name_size, 12);
        assert!(!settings.admin.limit_to_request_user);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_settings(Some("/nonexistent/refdata.toml")).unwrap_err();
        assert!(matches!(err, crate::error::AppError::Config(_)));
    }
}
