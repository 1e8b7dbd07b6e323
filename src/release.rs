//! Scoped resource release.
//!
//! [`Scoped`] owns a resource for the length of a block and releases it when the block
//! is left, whatever the exit path. A failed release is reported to the event sink as
//! [`FsEvent::CloseFailed`] and otherwise ignored: it never replaces the outcome of the
//! work that used the resource.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::ops::{Deref, DerefMut};

use crate::events::{EventSink, FsEvent};
use crate::platform;

/// A resource whose release can fail.
pub trait Release {
    fn release(self) -> io::Result<()>;
}

impl Release for File {
    fn release(self) -> io::Result<()> {
        platform::close_file(self)
    }
}

impl<R: Read + Release> Release for BufReader<R> {
    fn release(self) -> io::Result<()> {
        self.into_inner().release()
    }
}

/// Flushes buffered bytes, then releases the inner writer.
impl<W: Write + Release> Release for BufWriter<W> {
    fn release(self) -> io::Result<()> {
        let inner = self.into_inner().map_err(|e| e.into_error())?;
        inner.release()
    }
}

/// Release `resource` if present; log and swallow any failure.
pub fn close_quietly<R: Release>(sink: &dyn EventSink, resource: Option<R>, label: &str) {
    if let Some(r) = resource {
        if let Err(e) = r.release() {
            sink.record(&FsEvent::CloseFailed {
                resource: label.to_string(),
                error: e.to_string(),
            });
        }
    }
}

/// Drop guard around a resource. Derefs to the resource while in scope.
pub struct Scoped<'s, R: Release> {
    resource: Option<R>,
    label: String,
    sink: &'s dyn EventSink,
}

impl<'s, R: Release> Scoped<'s, R> {
    pub fn new(resource: R, label: impl Into<String>, sink: &'s dyn EventSink) -> Self {
        Self {
            resource: Some(resource),
            label: label.into(),
            sink,
        }
    }

    /// Take the resource back out; the guard will no longer release it.
    pub fn into_inner(mut self) -> R {
        self.resource
            .take()
            .expect("Scoped holds its resource until dropped or unwrapped")
    }

    /// Apply `f` to the resource (e.g. wrap it in a buffer) while keeping it guarded.
    pub fn map<T: Release>(self, f: impl FnOnce(R) -> T) -> Scoped<'s, T> {
        let sink = self.sink;
        let label = self.label.clone();
        Scoped::new(f(self.into_inner()), label, sink)
    }
}

impl<R: Release> Deref for Scoped<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.resource
            .as_ref()
            .expect("Scoped holds its resource until dropped or unwrapped")
    }
}

impl<R: Release> DerefMut for Scoped<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.resource
            .as_mut()
            .expect("Scoped holds its resource until dropped or unwrapped")
    }
}

impl<R: Release> Drop for Scoped<'_, R> {
    fn drop(&mut self) {
        close_quietly(self.sink, self.resource.take(), &self.label);
    }
}
