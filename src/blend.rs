//! Job orchestration: validation, worker scheduling, and the blend walk.
//!
//! [`Blender::blend`] validates synchronously on the caller's thread, then
//! hands the job to a worker pool and returns a [`BlendHandle`]. The worker
//! walks layers top-down to decide what actually needs decoding, composites
//! bottom-up, recolors, encodes, and sends the outcome through the handle's
//! completion channel, where the caller's thread consumes it.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;

use crate::codec::ImageReader;
use crate::compose::{self, Surface};
use crate::encode;
use crate::foundation::error::{TilemixError, TilemixResult};
use crate::job::{BlendJob, BlendOptions, JobLayer, LayerInput};

/// The result of a successful blend: the encoded output plus any non-fatal
/// decoder warnings collected along the way.
#[derive(Debug)]
pub struct BlendOutput {
    /// Encoded output bytes.
    pub buffer: Vec<u8>,
    /// Non-fatal warnings, each prefixed with the index of the layer that
    /// produced it.
    pub warnings: Vec<String>,
}

/// Completion handle for a scheduled blend job.
///
/// Jobs cannot be cancelled; once scheduled they always run to completion.
#[derive(Debug)]
pub struct BlendHandle {
    rx: mpsc::Receiver<TilemixResult<BlendOutput>>,
}

impl BlendHandle {
    /// Block until the job completes and return its outcome.
    pub fn wait(self) -> TilemixResult<BlendOutput> {
        self.rx.recv().map_err(|_| {
            TilemixError::from(anyhow::anyhow!(
                "blend worker disconnected before completing"
            ))
        })?
    }
}

/// Schedules blend jobs onto a dedicated worker pool.
pub struct Blender {
    pool: rayon::ThreadPool,
}

impl Blender {
    /// Build a blender with `threads` workers (`None` uses the pool default).
    pub fn new(threads: Option<usize>) -> TilemixResult<Self> {
        if threads == Some(0) {
            return Err(TilemixError::argument(
                "Blender 'threads' must be >= 1 when set",
            ));
        }
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build().map_err(|e| {
            TilemixError::from(anyhow::anyhow!("failed to build blend thread pool: {e}"))
        })?;
        Ok(Self { pool })
    }

    /// Validate a job and schedule it, returning its completion handle.
    ///
    /// Argument errors surface synchronously from this call; decode, encode
    /// and dimension failures surface through the handle. A single bare
    /// buffer without `reencode` completes immediately without being
    /// decoded.
    pub fn blend(
        &self,
        layers: Vec<LayerInput>,
        options: BlendOptions,
    ) -> TilemixResult<BlendHandle> {
        let mut layers = layers;
        let mut options = options;
        options.validate()?;

        if layers.is_empty() && !options.reencode {
            return Err(TilemixError::argument(
                "First argument must contain at least one Buffer.",
            ));
        }

        if layers.len() == 1
            && !options.reencode
            && matches!(layers.first(), Some(LayerInput::Buffer(_)))
        {
            if let Some(LayerInput::Buffer(buffer)) = layers.pop() {
                let (tx, rx) = mpsc::sync_channel(1);
                let _ = tx.send(Ok(BlendOutput {
                    buffer,
                    warnings: Vec::new(),
                }));
                return Ok(BlendHandle { rx });
            }
        }

        if layers.is_empty() && !(options.width > 0 && options.height > 0) {
            return Err(TilemixError::argument(
                "Without buffers, you have to specify width and height.",
            ));
        }

        if options.width < 0 || options.height < 0 {
            return Err(TilemixError::argument(
                "Image dimensions must be greater than 0.",
            ));
        }

        let job = BlendJob {
            layers: layers
                .into_iter()
                .map(|input| {
                    let (buffer, x, y) = input.into_parts();
                    JobLayer {
                        buffer,
                        x,
                        y,
                        decoded: None,
                    }
                })
                .collect(),
            options,
            warnings: Vec::new(),
        };

        let (tx, rx) = mpsc::sync_channel(1);
        self.pool.spawn(move || {
            let result = run_job(job);
            let _ = tx.send(result);
        });
        Ok(BlendHandle { rx })
    }

    /// Validate, schedule, and block for the outcome.
    pub fn blend_sync(
        &self,
        layers: Vec<LayerInput>,
        options: BlendOptions,
    ) -> TilemixResult<BlendOutput> {
        self.blend(layers, options)?.wait()
    }
}

#[tracing::instrument(skip(job), fields(layers = job.layers.len()))]
fn run_job(mut job: BlendJob) -> TilemixResult<BlendOutput> {
    let mut alpha = true;
    let mut size = 0usize;
    let mut width = job.options.width;
    let mut height = job.options.height;

    // Walk from the top layer down: once an opaque layer covers the canvas,
    // nothing beneath it needs decoding.
    for index in (0..job.layers.len()).rev() {
        if !alpha {
            break;
        }

        let layer = &mut job.layers[index];
        let mut reader = ImageReader::probe(&layer.buffer)?;
        let layer_width = reader.width() as i32;
        let layer_height = reader.height() as i32;

        let visible_width = layer_width.saturating_add(layer.x);
        let visible_height = layer_height.saturating_add(layer.y);

        // The first layer in the viewport seeds the canvas size when the
        // caller gave none.
        if width <= 0 {
            width = visible_width.max(0);
        }
        if height <= 0 {
            height = visible_height.max(0);
        }

        // Drop layers entirely outside the viewport.
        if visible_width <= 0
            || visible_height <= 0
            || layer.x >= width
            || layer.y >= height
        {
            continue;
        }

        // Zero-work fast path: a single opaque layer that covers the canvas
        // exactly is echoed without decoding.
        if size == 0
            && !reader.alpha()
            && !job.options.reencode
            && layer.x == 0
            && layer.y == 0
            && layer_width == width
            && layer_height == height
        {
            tracing::debug!(layer = index, "opaque cover layer, passing through");
            return Ok(BlendOutput {
                buffer: std::mem::take(&mut layer.buffer),
                warnings: std::mem::take(&mut job.warnings),
            });
        }

        reader.decode()?;
        let reader_width = reader.width();
        let reader_height = reader.height();
        let reader_alpha = reader.alpha();
        let reader_warnings = reader.warnings().to_vec();
        let pixels = reader.take_surface();

        for warning in &reader_warnings {
            job.warnings.push(format!("Layer {index}: {warning}"));
        }

        let covers_width = layer.x <= 0 && visible_width >= width;
        let covers_height = layer.y <= 0 && visible_height >= height;
        if !reader_alpha && covers_width && covers_height {
            // Skip decoding anything below.
            alpha = false;
        }

        if let Some(pixels) = pixels {
            layer.decoded = Some(Surface::from_pixels(reader_width, reader_height, pixels));
            size += 1;
        }
    }

    if i64::from(width) * i64::from(height) <= 0 {
        return Err(TilemixError::dimension(format!(
            "Image dimensions {width}x{height} are invalid"
        )));
    }

    let mut canvas = Surface::new(width as u32, height as u32)?;

    // The matte only matters when the stack may let it show through.
    if alpha {
        canvas.fill(job.options.matte);
    }

    for layer in &job.layers {
        if let Some(decoded) = &layer.decoded {
            compose::composite(&mut canvas, decoded, layer.x, layer.y);
        }
    }

    if let Some(tint) = &job.options.tint {
        tint.apply(&mut canvas);
    }

    let encoded = std::panic::catch_unwind(AssertUnwindSafe(|| {
        encode::encode(&canvas, &job.options, alpha)
    }));
    let buffer = match encoded {
        Ok(result) => result?,
        Err(panic) => return Err(TilemixError::encode(panic_message(panic.as_ref()))),
    };

    Ok(BlendOutput {
        buffer,
        warnings: job.warnings,
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "encoder panicked".to_owned()
    }
}

#[cfg(test)]
#[path = "../tests/unit/blend.rs"]
mod tests;
