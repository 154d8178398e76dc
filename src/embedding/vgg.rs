use candle_core::{DType, Device, Result, Tensor};
use candle_nn::{Conv2d, Conv2dConfig, Module, VarBuilder, conv2d};
use std::path::Path;

/// Conv layers of the VGG16 feature stack, grouped by block. Each entry is
/// `(features index, in channels, out channels)` in the torchvision
/// safetensors layout; a 2x2 max-pool follows each block.
const CONV_LAYOUT: [&[(usize, usize, usize)]; 5] = [
    &[(0, 3, 64), (2, 64, 64)],
    &[(5, 64, 128), (7, 128, 128)],
    &[(10, 128, 256), (12, 256, 256), (14, 256, 256)],
    &[(17, 256, 512), (19, 512, 512), (21, 512, 512)],
    &[(24, 512, 512), (26, 512, 512), (28, 512, 512)],
];

/// Number of output channels of the final conv block.
pub const OUTPUT_CHANNELS: usize = 512;

/// Total downsampling factor across the five max-pools.
pub const DOWNSAMPLE_FACTOR: usize = 32;

/// VGG16 convolutional backbone with the classifier head excluded.
pub struct VggBackbone {
    blocks: Vec<Vec<Conv2d>>,
}

impl VggBackbone {
    /// Loads pretrained weights from a safetensors file.
    pub fn load<P: AsRef<Path>>(weights_path: P, device: &Device) -> Result<Self> {
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path.as_ref()], DType::F32, device)?
        };
        Self::from_varbuilder(vb)
    }

    fn from_varbuilder(vb: VarBuilder) -> Result<Self> {
        let cfg = Conv2dConfig {
            padding: 1,
            ..Default::default()
        };

        let features = vb.pp("features");
        let mut blocks = Vec::with_capacity(CONV_LAYOUT.len());
        for layout in CONV_LAYOUT {
            let mut convs = Vec::with_capacity(layout.len());
            for &(index, in_c, out_c) in layout {
                convs.push(conv2d(in_c, out_c, 3, cfg, features.pp(index.to_string()))?);
            }
            blocks.push(convs);
        }

        Ok(Self { blocks })
    }

    /// Runs the conv stack over `[batch, 3, h, w]` input, returning the final
    /// pooled feature map `[batch, 512, h/32, w/32]`.
    pub fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let mut x = input.clone();
        for convs in &self.blocks {
            for conv in convs {
                x = conv.forward(&x)?.relu()?;
            }
            x = x.max_pool2d(2)?;
        }
        Ok(x)
    }

    /// Flattened embedding length for a square input of `input_size`.
    pub fn output_dim(input_size: usize) -> usize {
        let side = input_size / DOWNSAMPLE_FACTOR;
        side * side * OUTPUT_CHANNELS
    }
}
