use log::{debug, info};
use rusb::{Context, Device, DeviceDescriptor, DeviceHandle, Direction, TransferType, UsbContext};
use std::{io::Write, str::FromStr, time::Duration};

use crate::{config::Config, error::Error};

/// Convert `image` and write the whole command stream to `writer`.
///
/// Works with anything byte oriented: a file, stdout, or a `TcpStream`
/// connected to a network printer (usually port 9100). Nothing is written
/// when the conversion fails.
pub fn write_image<W: Write>(writer: &mut W, image: &[u8], config: &Config) -> Result<usize, Error> {
    let buf = config.convert(image)?;
    writer.write_all(&buf)?;
    writer.flush()?;
    debug!("wrote {} bytes", buf.len());
    Ok(buf.len())
}

/// USB identity of a printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbDevice {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Pick a specific unit when several identical printers are attached.
    pub serial: Option<String>,
}

impl FromStr for UsbDevice {
    type Err = Error;

    /// Parse `VID:PID` or `VID:PID:SERIAL`, ids in hex (`04b8:0202`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidConfig(format!("invalid usb device '{}'", s));
        let hex = |v: &str| u16::from_str_radix(v.trim_start_matches("0x"), 16).map_err(|_| invalid());

        let mut parts = s.splitn(3, ':');
        let vendor_id = hex(parts.next().ok_or_else(invalid)?)?;
        let product_id = hex(parts.next().ok_or_else(invalid)?)?;
        let serial = match parts.next() {
            Some("") => return Err(invalid()),
            Some(serial) => Some(serial.to_string()),
            None => None,
        };

        Ok(UsbDevice {
            vendor_id,
            product_id,
            serial,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Endpoint {
    config: u8,
    iface: u8,
    setting: u8,
    address: u8,
}

/// ESC/POS printer attached over USB.
pub struct Printer {
    handle: DeviceHandle<Context>,
    endpoint_out: Endpoint,
    config: Config,
}

impl Printer {
    pub fn new(device: UsbDevice, config: Config) -> Result<Self, Error> {
        config.validate()?;

        let mut context = Context::new()?;
        let (usb_device, device_desc, mut handle) = Self::open_device(&mut context, &device)?;
        handle.reset()?;

        let endpoint_out = match Self::find_bulk_out(&usb_device, &device_desc) {
            Some(endpoint) => endpoint,
            None => return Err(Error::MissingEndpoint),
        };
        debug!("{:?}", endpoint_out);

        // Linux binds usblp to most receipt printers. With auto detach the
        // driver is unbound on claim and bound again on release.
        if let Err(err) = handle.set_auto_detach_kernel_driver(true) {
            debug!("Auto detach of kernel driver unavailable: {:?}", err);
        }
        let has_kernel_driver = matches!(handle.kernel_driver_active(endpoint_out.iface), Ok(true));
        info!(" Kernel driver active: {}", has_kernel_driver);

        handle.set_active_configuration(endpoint_out.config)?;
        handle.claim_interface(endpoint_out.iface)?;
        handle.set_alternate_setting(endpoint_out.iface, endpoint_out.setting)?;

        Ok(Printer {
            handle,
            endpoint_out,
            config,
        })
    }

    fn open_device(
        context: &mut Context,
        device: &UsbDevice,
    ) -> Result<(Device<Context>, DeviceDescriptor, DeviceHandle<Context>), Error> {
        let devices = context.devices()?;

        if devices.len() == 0 {
            debug!("Failed to read device list");
            return Err(Error::DeviceListNotReadable);
        }
        for candidate in devices.iter() {
            let device_desc = match candidate.device_descriptor() {
                Ok(d) => d,
                Err(err) => {
                    debug!("{:?}", err);
                    continue;
                }
            };

            if device_desc.vendor_id() != device.vendor_id
                || device_desc.product_id() != device.product_id
            {
                continue;
            }
            debug!("{:?}", device_desc);

            let handle = match candidate.open() {
                Ok(handle) => handle,
                Err(err) => {
                    debug!("Failed to open device: {:?}", err);
                    continue;
                }
            };

            match &device.serial {
                None => return Ok((candidate, device_desc, handle)),
                Some(serial) => {
                    let timeout = Duration::from_secs(1);
                    let languages = match handle.read_languages(timeout) {
                        Ok(languages) => languages,
                        Err(err) => {
                            debug!("Failed to read languages: {:?}", err);
                            continue;
                        }
                    };

                    if let Some(language) = languages.first() {
                        match handle.read_serial_number_string(*language, &device_desc, timeout) {
                            Ok(s) if &s == serial => return Ok((candidate, device_desc, handle)),
                            Ok(_) => continue,
                            Err(err) => {
                                debug!("Failed to read serial number string: {:?}", err);
                                continue;
                            }
                        }
                    }
                }
            }
        }
        debug!("No device match with {:?}", device);
        Err(Error::DeviceOffline)
    }

    /// Locate the bulk OUT endpoint the command stream is written to.
    fn find_bulk_out(device: &Device<Context>, device_desc: &DeviceDescriptor) -> Option<Endpoint> {
        let mut candidates = Vec::new();
        for n in 0..device_desc.num_configurations() {
            let config_desc = match device.config_descriptor(n) {
                Ok(c) => c,
                Err(err) => {
                    debug!("Failed to read configuration {}: {:?}", n, err);
                    continue;
                }
            };
            for interface_desc in config_desc.interfaces().flat_map(|i| i.descriptors()) {
                for endpoint_desc in interface_desc.endpoint_descriptors() {
                    candidates.push((
                        Endpoint {
                            config: config_desc.number(),
                            iface: interface_desc.interface_number(),
                            setting: interface_desc.setting_number(),
                            address: endpoint_desc.address(),
                        },
                        endpoint_desc.direction(),
                        endpoint_desc.transfer_type(),
                    ));
                }
            }
        }
        first_bulk_out(candidates)
    }

    /// Send pre-built command bytes as they are.
    pub fn write_raw(&self, buf: &[u8]) -> Result<usize, Error> {
        let timeout = Duration::from_secs(10);
        let n = self
            .handle
            .write_bulk(self.endpoint_out.address, buf, timeout)?;
        if n == buf.len() {
            Ok(n)
        } else {
            debug!(
                "write error: bytes wrote {} != bytes supplied {}, possibly timeout ?",
                n,
                buf.len()
            );
            Err(Error::InvalidResponse(n))
        }
    }

    /// Print an image
    ///
    /// The image is fully converted before anything is sent.
    pub fn print(&self, image: &[u8]) -> Result<(), Error> {
        let buf = self.config.convert(image)?;
        log::debug!("sending {} bytes", buf.len());
        self.write_raw(&buf)?;
        Ok(())
    }
}

/// Printers expose a bulk IN endpoint for status and sometimes interrupt
/// endpoints as well; only the first bulk OUT one carries print data.
fn first_bulk_out(
    candidates: impl IntoIterator<Item = (Endpoint, Direction, TransferType)>,
) -> Option<Endpoint> {
    candidates
        .into_iter()
        .find(|(_, direction, transfer_type)| {
            *direction == Direction::Out && *transfer_type == TransferType::Bulk
        })
        .map(|(endpoint, _, _)| endpoint)
}

impl Drop for Printer {
    fn drop(&mut self) {
        // Releasing hands the interface back to the kernel driver.
        if let Err(err) = self.handle.release_interface(self.endpoint_out.iface) {
            debug!("Failed to release interface: {:?}", err);
        }
    }
}
