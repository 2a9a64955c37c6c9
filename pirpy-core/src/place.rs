use alloc::string::String;
use core::fmt::{Display, Formatter};

/// Kind of memory a place refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AllocationType {
    /// Place was not set
    Undefined,
    /// Host memory
    CPU,
    /// Cuda device memory
    GPU,
    /// Page locked host memory
    GPUPinned,
    /// Kunlun device memory
    XPU,
    /// Graphcore device memory
    IPU,
    /// Plugged in device, see [`Place::device_type`]
    Custom,
}

impl AllocationType {
    /// Name of the allocation type, e.g. `gpu_pinned`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AllocationType::Undefined => "undefined",
            AllocationType::CPU => "cpu",
            AllocationType::GPU => "gpu",
            AllocationType::GPUPinned => "gpu_pinned",
            AllocationType::XPU => "xpu",
            AllocationType::IPU => "ipu",
            AllocationType::Custom => "custom",
        }
    }

    /// Host memory is not indexed by device
    #[must_use]
    pub const fn is_host(self) -> bool {
        matches!(self, AllocationType::CPU | AllocationType::GPUPinned)
    }
}

/// Memory place of a tensor
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Place {
    kind: AllocationType,
    device_id: i8,
    device_type: String,
}

impl Place {
    /// Place of allocation type with device index
    #[must_use]
    pub const fn new(kind: AllocationType, device_id: i8) -> Place {
        Place { kind, device_id, device_type: String::new() }
    }

    /// Host place
    #[must_use]
    pub const fn cpu() -> Place {
        Place::new(AllocationType::CPU, 0)
    }

    /// Cuda device place
    #[must_use]
    pub const fn gpu(device_id: i8) -> Place {
        Place::new(AllocationType::GPU, device_id)
    }

    /// Plugged in device place
    #[must_use]
    pub fn custom(device_type: impl Into<String>, device_id: i8) -> Place {
        Place { kind: AllocationType::Custom, device_id, device_type: device_type.into() }
    }

    /// Allocation type
    #[must_use]
    pub const fn kind(&self) -> AllocationType {
        self.kind
    }

    /// Index of device
    #[must_use]
    pub const fn device_id(&self) -> i8 {
        self.device_id
    }

    /// Device type, for custom places this is the name of the plugged in device,
    /// otherwise the allocation type name
    #[must_use]
    pub fn device_type(&self) -> &str {
        match self.kind {
            AllocationType::Custom => &self.device_type,
            kind => kind.name(),
        }
    }
}

impl Display for Place {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.kind.is_host() {
            f.write_fmt(format_args!("Place({})", self.device_type()))
        } else {
            f.write_fmt(format_args!("Place({}:{})", self.device_type(), self.device_id))
        }
    }
}

/// Layout of tensor data
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataLayout {
    /// Any layout
    Any,
    /// Batch, height, width, channels
    NHWC,
    /// Batch, channels, height, width
    NCHW,
    /// Batch, channels, depth, height, width
    NCDHW,
    /// Batch, depth, height, width, channels
    NDHWC,
    /// Layout chosen by oneDNN
    OneDNN,
    /// Sparse coordinate format
    SparseCoo,
    /// Sparse compressed row format
    SparseCsr,
    /// Strided layout
    Strided,
}

impl DataLayout {
    /// Name of the layout
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DataLayout::Any => "ANY",
            DataLayout::NHWC => "NHWC",
            DataLayout::NCHW => "NCHW",
            DataLayout::NCDHW => "NCDHW",
            DataLayout::NDHWC => "NDHWC",
            DataLayout::OneDNN => "ONEDNN",
            DataLayout::SparseCoo => "SPARSE_COO",
            DataLayout::SparseCsr => "SPARSE_CSR",
            DataLayout::Strided => "STRIDED",
        }
    }
}

impl Display for DataLayout {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn place_device_type() {
    assert_eq!(Place::cpu().device_type(), "cpu");
    assert_eq!(Place::new(AllocationType::GPUPinned, 0).device_type(), "gpu_pinned");
    assert_eq!(Place::custom("npu", 1).device_type(), "npu");
    assert!(Place::new(AllocationType::GPUPinned, 3).kind().is_host());
    assert!(!Place::gpu(2).kind().is_host());
}
