use derive_new::new;

// 保存先の参照文字列の最大長
pub const PHOTO_REFERENCE_MAX_LENGTH: usize = 200;

#[derive(Debug, new)]
pub struct UploadPhoto {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl UploadPhoto {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }

    // 元のファイル名から拡張子を取り出す。英数字以外を含むものは捨てる
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.as_deref()?.rsplit_once('.')?;
        (!ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .then(|| ext.to_ascii_lowercase())
    }
}
