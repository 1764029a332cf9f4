use super::model::library::Library;

/// 永続化の抽象。Infra層が実装する。
pub trait LibraryRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 保存済みLibraryを読み込む。保存先が存在しなければ空のLibrary。
    fn load(&self) -> Result<Library, Self::Error>;

    /// Library全体で保存先を上書きする。
    fn save(&self, library: &Library) -> Result<(), Self::Error>;
}
