use tokio::io::AsyncWriteExt;
use tokio::io::{self, AsyncWrite};

pub trait Prompt {
    fn draw<S: AsyncWrite + Unpin>(
        &self,
        sink: S,
    ) -> impl std::future::Future<Output = io::Result<()>>;
}

#[derive(Debug)]
pub struct DefaultPrompt;

impl Prompt for DefaultPrompt {
    async fn draw<S: AsyncWrite + Unpin>(&self, mut sink: S) -> io::Result<()> {
        sink.write_u8(b'$').await?;
        sink.write_u8(b' ').await?;

        Ok(())
    }
}

/// Form-style prompt, e.g. `Drug Name: `.
#[derive(Debug, Clone)]
pub struct FieldPrompt {
    pub label: String,
}

impl FieldPrompt {
    pub fn new<L: Into<String>>(label: L) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Prompt for FieldPrompt {
    async fn draw<S: AsyncWrite + Unpin>(&self, mut sink: S) -> io::Result<()> {
        sink.write_all(self.label.as_bytes()).await?;
        sink.write_all(b": ").await?;

        Ok(())
    }
}
