// 数据层 - 种族数据集与等级系数表的来源
// 内置数据随程序发布；外部数据从 JSON/TOML 文件加载

pub mod builtin;
pub mod loader;

pub use loader::{load_level_scalars, save_level_scalars, DataFormat, Dataset};
