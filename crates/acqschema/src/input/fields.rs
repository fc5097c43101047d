//! Default metadata field selection for MR acquisitions.

/// Fields selected when the operator does not pick any.
pub const DEFAULT_DICOM_FIELDS: &[&str] = &[
    // Core identifiers
    "SeriesDescription",
    "SequenceName",
    "SequenceVariant",
    "ScanningSequence",
    "ImageType",
    "Manufacturer",
    "ManufacturerModelName",
    "SoftwareVersion",
    // Geometry
    "MRAcquisitionType",
    "SliceThickness",
    "PixelSpacing",
    "Rows",
    "Columns",
    "Slices",
    "AcquisitionMatrix",
    "ReconstructionDiameter",
    // Timing / contrast
    "RepetitionTime",
    "EchoTime",
    "InversionTime",
    "FlipAngle",
    "EchoTrainLength",
    "GradientEchoTrainLength",
    "NumberOfTemporalPositions",
    "TemporalResolution",
    "SliceTiming",
    // Diffusion
    "DiffusionBValue",
    "DiffusionGradientDirectionSequence",
    // Parallel imaging / multiband
    "ParallelAcquisitionTechnique",
    "ParallelReductionFactorInPlane",
    "PartialFourier",
    "SliceAccelerationFactor",
    // Bandwidth / readout
    "PixelBandwidth",
    "BandwidthPerPixelPhaseEncode",
    // Phase encoding
    "InPlanePhaseEncodingDirection",
    "PhaseEncodingDirectionPositive",
    "NumberOfPhaseEncodingSteps",
    // Scanner hardware
    "MagneticFieldStrength",
    "ImagingFrequency",
    "ImagedNucleus",
    "TransmitCoilName",
    "ReceiveCoilName",
    "SAR",
    "NumberOfAverages",
    "CoilType",
    // Coverage
    "PercentSampling",
    "PercentPhaseFieldOfView",
    // Scan options
    "ScanOptions",
    "AngioFlag",
    // Triggering / gating
    "TriggerTime",
    "TriggerSourceOrType",
    "BeatRejectionFlag",
    "LowRRValue",
    "HighRRValue",
    // Advanced
    "SpoilingRFPhaseAngle",
    "PerfusionTechnique",
    "SpectrallySelectedExcitation",
    "SaturationRecovery",
    "SpectrallySelectedSuppression",
    "TimeOfFlightContrast",
    "SteadyStatePulseSequence",
    "PartialFourierDirection",
];
