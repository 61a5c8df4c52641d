use crate::error::SelectionError;

/// Media types must start with this prefix to be accepted.
pub const AUDIO_PREFIX: &str = "audio/";

/// A user-chosen file that passed media type validation.
///
/// `B` is the underlying blob handle (`web_sys::File` in the browser).
/// The only way to build one is [`SelectedFile::new`], so every value in
/// circulation has an `audio/*` type.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile<B> {
    name: String,
    media_type: String,
    size: u64,
    blob: B,
}

impl<B> SelectedFile<B> {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        size: u64,
        blob: B,
    ) -> Result<Self, SelectionError> {
        let name = name.into();
        let media_type = media_type.into();
        if !is_audio_type(&media_type) {
            return Err(SelectionError::NotAudio { name, media_type });
        }
        Ok(Self { name, media_type, size, blob })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }
}

/// Literal, case-sensitive prefix check as browsers report lower-case types.
pub fn is_audio_type(media_type: &str) -> bool {
    media_type.starts_with(AUDIO_PREFIX)
}

/// The single current selection. Empty until the first valid pick.
#[derive(Clone, Debug)]
pub struct FileSelection<B> {
    current: Option<SelectedFile<B>>,
}

impl<B> Default for FileSelection<B> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<B> FileSelection<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SelectedFile<B>> {
        self.current.as_ref()
    }

    /// Validate `candidate` and make it the current selection.
    ///
    /// On rejection the previous selection is left untouched.
    pub fn select(
        &mut self,
        name: impl Into<String>,
        media_type: impl Into<String>,
        size: u64,
        blob: B,
    ) -> Result<&SelectedFile<B>, SelectionError> {
        let file = SelectedFile::new(name, media_type, size, blob)?;
        log::info!("Selected \"{}\" ({}, {} bytes)", file.name, file.media_type, file.size);
        Ok(&*self.current.insert(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_audio_without_selection() {
        let mut sel = FileSelection::new();
        let err = sel.select("photo.png", "image/png", 10, ()).unwrap_err();
        assert_eq!(
            err,
            SelectionError::NotAudio { name: "photo.png".into(), media_type: "image/png".into() }
        );
        assert!(sel.current().is_none());
    }

    #[test]
    fn test_rejection_keeps_previous_selection() {
        let mut sel = FileSelection::new();
        sel.select("clip.mp3", "audio/mpeg", 1000, 1u8).unwrap();
        for bad in ["image/png", "video/mp4", "", "Audio/mpeg", "text/audio/plain", "application/ogg"] {
            assert!(sel.select("other", bad, 5, 2u8).is_err(), "{bad} accepted");
            let cur = sel.current().unwrap();
            assert_eq!(cur.name(), "clip.mp3");
            assert_eq!(*cur.blob(), 1u8);
        }
    }

    #[test]
    fn test_audio_types_replace_selection() {
        let mut sel = FileSelection::new();
        for (i, ty) in ["audio/mpeg", "audio/wav", "audio/x-flac", "audio/ogg; codecs=opus"].iter().enumerate() {
            let name = format!("f{i}");
            let picked = sel.select(name.clone(), *ty, 1, i).unwrap();
            assert_eq!(picked.name(), name);
            assert_eq!(*sel.current().unwrap().blob(), i);
        }
    }
}
